use thiserror::Error;

/// Failure outcomes of sending a command to the device
#[derive(Debug, Error)]
pub enum SendError {
    #[error("please configure connection: host and port must not be empty")]
    NotConfigured,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("a request is already in flight")]
    Busy,

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} failed with status {status} and body: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
}

impl SendError {
    /// Classify a reqwest failure for the given url
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SendError::Timeout {
                url: url.to_string(),
            }
        } else {
            SendError::Transport {
                url: url.to_string(),
                // alternate format includes the source chain (dns, refused, ...)
                message: format!("{:#}", anyhow::Error::from(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_url() {
        let err = SendError::Status {
            url: "http://192.168.0.2/socket0Send".to_string(),
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request to http://192.168.0.2/socket0Send failed with status 404 and body: not found"
        );

        let err = SendError::Timeout {
            url: "http://192.168.0.2/socket1Send".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request to http://192.168.0.2/socket1Send timed out"
        );
    }

    #[test]
    fn not_configured_asks_for_configuration() {
        assert!(
            SendError::NotConfigured
                .to_string()
                .starts_with("please configure connection")
        );
    }
}
