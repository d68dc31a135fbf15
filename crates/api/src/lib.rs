pub mod error;
pub mod page;

mod categories;
mod questions;
mod quiz;
mod util {
    pub mod query;
    pub mod response;
}

#[cfg(test)]
mod fixture;

use db::Store;
use error::Error;
use http_body_util::Full;
use hyper::{
    body::{Body, Bytes},
    Method, Request, Response,
};

/// Error type that request bodies must convert into.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Request router over a [`Store`]. The store is the only state shared between requests.
pub struct App<S> {
    store: S,
}

impl<S: Store> App<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Routes the request and renders every failure as a JSON error envelope. CORS headers are
    /// attached to all responses.
    pub async fn respond<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let path = parts.uri.path();
        let query = parts.uri.query().unwrap_or_default();

        let mut res = match self.try_respond(&parts.method, path, query, body).await {
            Ok(res) => res,
            Err(err) => err.into_response(),
        };

        log::debug!("{} {} -> {}", parts.method, parts.uri, res.status());
        util::response::allow_cors(res.headers_mut());
        res
    }

    async fn try_respond<B>(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        body: B,
    ) -> error::Result<Response<Full<Bytes>>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        if method == Method::OPTIONS {
            return Ok(util::response::no_content());
        }

        let page = util::query::page(query);
        let segments: Vec<_> = path.strip_prefix('/').ok_or(Error::NotFound)?.split('/').collect();
        match segments.as_slice() {
            ["categories"] if method == Method::GET => categories::list(&self.store).await,
            ["categories", id, "questions"] => {
                let id = parse_id(id)?;
                if method != Method::GET {
                    return Err(Error::MethodNotAllowed);
                }
                questions::by_category(&self.store, id, page).await
            }
            ["questions"] if method == Method::GET => questions::list(&self.store, page).await,
            ["questions"] if method == Method::POST => {
                let bytes = util::response::read_body(body).await?;
                questions::submit(&self.store, &bytes, page).await
            }
            ["questions", id] => {
                let id = parse_id(id)?;
                if method != Method::DELETE {
                    return Err(Error::MethodNotAllowed);
                }
                questions::delete(&self.store, id, page).await
            }
            ["quizzes"] if method == Method::POST => {
                let bytes = util::response::read_body(body).await?;
                quiz::next(&self.store, &bytes).await
            }
            ["categories" | "questions" | "quizzes"] => Err(Error::MethodNotAllowed),
            _ => Err(Error::NotFound),
        }
    }
}

/// Path identifiers must be plain integers; anything else does not match the route at all.
fn parse_id(segment: &str) -> error::Result<i32> {
    segment.parse().map_err(|_| Error::NotFound)
}
