use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("webhook answered with status {0}")]
    Status(u16),
}

impl SubmitError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Status(_) => "status",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { .. } => None,
            Self::Status(status) => Some(*status),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_net::Error> for SubmitError {
    fn from(error: gloo_net::Error) -> Self {
        Self::request(error.to_string())
    }
}
