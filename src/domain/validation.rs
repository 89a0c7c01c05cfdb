use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidMessageId { input: String },
    InvalidSendTime { input: String, expected: &'static str },
    BelowMinimum { field: &'static str, min: u32, actual: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidMessageId { input } => write!(f, "invalid message id: {input:?}"),
            Self::InvalidSendTime { input, expected } => {
                write!(f, "invalid send time: {input:?} (expected {expected})")
            }
            Self::BelowMinimum { field, min, actual } => {
                write!(f, "{field} out of range: {actual} (expected >= {min})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
