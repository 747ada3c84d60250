//! Environment variables of the current process.

use std::env::{self, VarError};

use crate::error::{Error, Result};

/// Value of `name`, or an empty string when it is unset.
pub fn get_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(String::new()),
        Err(VarError::NotUnicode(_)) => Err(Error::NotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Set `name` for this process and return the value read back.
///
/// Names that are empty or contain `=` or NUL are rejected, as are values
/// containing NUL; the standard library would panic on them.
pub fn set_env(name: &str, value: &str) -> Result<String> {
    validate(name, value)?;
    env::set_var(name, value);
    get_env(name)
}

fn validate(name: &str, value: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('=') {
        Some("name contains '='")
    } else if name.contains('\0') {
        Some("name contains NUL")
    } else if value.contains('\0') {
        Some("value contains NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidEnv {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let value = set_env("HOSTLIB_SYS_TEST_SET", "Hi there").unwrap();
        assert_eq!(value, "Hi there");
        assert_eq!(get_env("HOSTLIB_SYS_TEST_SET").unwrap(), "Hi there");
    }

    #[test]
    fn unset_is_empty() {
        assert_eq!(get_env("HOSTLIB_SYS_TEST_NEVER_SET").unwrap(), "");
    }

    #[test]
    fn invalid_names_rejected() {
        for name in ["", "A=B", "A\0B"] {
            let err = set_env(name, "x").unwrap_err();
            assert!(matches!(err, Error::InvalidEnv { .. }), "{name:?}");
        }
    }

    #[test]
    fn nul_value_rejected() {
        let err = set_env("HOSTLIB_SYS_TEST_NUL", "a\0b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid environment variable \"HOSTLIB_SYS_TEST_NUL\": value contains NUL"
        );
    }
}
