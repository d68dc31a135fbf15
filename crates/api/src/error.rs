use core::fmt::{self, Display};
use http_body_util::Full;
use hyper::{body::Bytes, Response, StatusCode};
use serde::Serialize;

/// Failure kinds surfaced to clients. Each renders as a fixed JSON envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Internal,
}

impl Error {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Unprocessable => "Unprocessable",
            Self::Internal => "Internal Server Error",
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        #[derive(Serialize)]
        struct Envelope {
            success: bool,
            error: u16,
            message: &'static str,
        }

        let status = self.status();
        let envelope = Envelope { success: false, error: status.as_u16(), message: self.message() };
        crate::util::response::json(status, &envelope).unwrap_or_else(|_| {
            let mut res = Response::new(Full::default());
            *res.status_mut() = status;
            res
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
