//! A single documented capability.

use std::fmt;

/// Documentation for one capability, or for an object as a whole.
///
/// Parameters are free-form display strings. They are never checked against
/// the values a script actually passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    object: String,
    function: Option<String>,
    params: Vec<String>,
    description: String,
}

impl HelpEntry {
    /// Document `object.function(params...)`.
    pub fn function(
        object: impl Into<String>,
        function: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            object: object.into(),
            function: Some(function.into()),
            params: params.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Document an object without pointing at any of its functions.
    pub fn object(object: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            function: None,
            params: Vec::new(),
            description: description.into(),
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object
    }

    /// The documented function, `None` for object-level entries.
    pub fn function_name(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_object_level(&self) -> bool {
        self.function.is_none()
    }

    /// The displayable signature, also used as the completion term.
    ///
    /// `os.exit(code int, msg string)`, `os.args()`, or just `os` for an
    /// object-level entry.
    pub fn signature(&self) -> String {
        match &self.function {
            Some(function) => format!("{}.{}({})", self.object, function, self.params.join(", ")),
            None => self.object.clone(),
        }
    }
}

impl fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n    {}", self.signature(), self.description)
    }
}
