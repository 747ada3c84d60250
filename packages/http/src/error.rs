#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("can't create a {method} request for {url}: {reason}")]
    Request {
        method: http::Method,
        url: String,
        reason: String,
    },

    #[error("can't connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("can't read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// True for failures that happened before anything was sent.
    pub fn is_request(&self) -> bool {
        matches!(self, Error::Request { .. })
    }
}
