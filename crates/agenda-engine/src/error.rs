//! Error types for agenda-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Missing timezone identifier")]
    MissingTimezone,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Timer error: {0}")]
    Timer(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
