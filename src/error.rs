//! Errors raised while reshaping a single unitdef

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReshapeError {
    #[error("{unit}: required field `{field}` is missing")]
    MissingField { unit: String, field: &'static str },

    #[error("{unit}: field `{field}` is not a {expected}")]
    InvalidField {
        unit: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{unit}: `customParams` is missing")]
    MissingCustomParams { unit: String },

    /// The unit matches no known archetype; usually a new engine unit type.
    #[error("{unit}: air unit is tagged neither `space` nor `air`")]
    UnexpectedArchetype { unit: String },

    #[error("no unit registered for engine id {0}")]
    UnknownId(i64),
}

pub type Result<T> = std::result::Result<T, ReshapeError>;
