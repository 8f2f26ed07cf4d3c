use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyMessage,
    InvalidApiBase { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => f.write_str("Message cannot be empty."),
            Self::InvalidApiBase { input, reason } => {
                write!(f, "invalid API base URL {input:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
