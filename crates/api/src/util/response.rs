use crate::{
    error::{self, Error},
    BoxError,
};
use http_body_util::{BodyExt, Full, Limited};
use hyper::{
    body::{Body, Bytes},
    header::{
        HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
    },
    Response, StatusCode,
};
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";

/// Largest request body accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Serializes `body` as the JSON payload of a response with the given status.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> error::Result<Response<Full<Bytes>>> {
    let bytes = serde_json::to_vec(body).map_err(|err| {
        log::error!("cannot serialize response: {err}");
        Error::Internal
    })?;

    let mut res = Response::new(Full::new(Bytes::from(bytes)));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)).is_none());
    Ok(res)
}

/// Empty reply to CORS preflight requests.
pub fn no_content() -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::default());
    *res.status_mut() = StatusCode::NO_CONTENT;
    res
}

/// Cross-origin requests are allowed from anywhere.
pub fn allow_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type,Authorization,true"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET,PATCH,POST,DELETE,OPTIONS"));
}

/// Buffers the entire request body. Bodies over [`MAX_BODY_SIZE`] are rejected.
pub async fn read_body<B>(body: B) -> error::Result<Bytes>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let collected = Limited::new(body, MAX_BODY_SIZE).collect().await.map_err(|err| {
        log::warn!("cannot read request body: {err}");
        Error::BadRequest
    })?;
    Ok(collected.to_bytes())
}
