use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Build(String),
    Network(String),
    Status(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Build(msg) => write!(f, "Client build error: {msg}"),
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Status(msg) => write!(f, "Unexpected status: {msg}"),
        }
    }
}

impl Error for FetchError {}
