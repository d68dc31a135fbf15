use core::fmt::{self, Display};
use tokio_postgres::error::SqlState;

/// SQL states that blame the submitted values rather than the database itself.
const BAD_INPUT_STATES: [SqlState; 6] = [
    SqlState::NOT_NULL_VIOLATION,
    SqlState::CHECK_VIOLATION,
    SqlState::FOREIGN_KEY_VIOLATION,
    SqlState::INVALID_TEXT_REPRESENTATION,
    SqlState::NUMERIC_VALUE_OUT_OF_RANGE,
    SqlState::STRING_DATA_RIGHT_TRUNCATION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The submitted record violates a constraint of the schema.
    BadInput,
    /// Unrecoverable error.
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BadInput => "record rejected by a schema constraint",
            Self::Fatal => "unrecoverable database failure",
        })
    }
}

impl std::error::Error for Error {}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        log::error!("postgres: {err}");
        match err.code() {
            Some(code) if BAD_INPUT_STATES.contains(code) => Self::BadInput,
            _ => Self::Fatal,
        }
    }
}

impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        log::error!("connection pool: {err}");
        Self::Fatal
    }
}

pub type Result<T> = core::result::Result<T, Error>;
