use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("WebDriver error \"{error}\": {message}")]
    WebDriver { error: String, message: String },

    #[error("malformed WebDriver response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },
}
