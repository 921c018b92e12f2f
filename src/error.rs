use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    MissingWindow,
    MissingDocument,
    Config(String),
    Js(String),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingDocument => write!(f, "window has no document"),
            Self::Config(msg) => write!(f, "invalid motion config: {msg}"),
            Self::Js(msg) => write!(f, "browser call failed: {msg}"),
        }
    }
}

impl StdError for MotionError {}

impl From<serde_json::Error> for MotionError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
