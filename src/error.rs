#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DawaError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    #[error("API error from {api}: {message}")]
    Api { api: String, message: String },

    #[error("API JSON error from {api}: {source}")]
    ApiJson {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed response from {api}: {message}")]
    InvalidBody { api: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DawaError {
    /// Detail worth appending to the generic failure message.
    ///
    /// Transport failures and unusable bodies carry one; a non-success HTTP status
    /// does not.
    pub fn transport_detail(&self) -> Option<String> {
        match self {
            Self::Http(err) | Self::HttpClientInit(err) => Some(err.to_string()),
            Self::HttpMiddleware(err) => Some(err.to_string()),
            Self::ApiJson { source, .. } => Some(source.to_string()),
            Self::InvalidBody { message, .. } => Some(message.clone()),
            Self::Api { .. }
            | Self::InvalidArgument(_)
            | Self::Template(_)
            | Self::Json(_) => None,
        }
    }
}
