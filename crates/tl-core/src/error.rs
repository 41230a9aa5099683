use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TlError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },
}
