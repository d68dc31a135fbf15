use crate::{
    error::{self, Error},
    util::response,
};
use db::{Category, Store};
use http_body_util::Full;
use hyper::{body::Bytes, Response, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Category labels keyed by identifier. Serializes as a JSON object in identifier order.
pub type CategoryMap = BTreeMap<i32, String>;

pub fn to_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|Category { id, kind }| (id, kind)).collect()
}

#[derive(Serialize)]
struct CategoryList {
    success: bool,
    categories: CategoryMap,
    total_categories: usize,
}

pub async fn list<S: Store>(store: &S) -> error::Result<Response<Full<Bytes>>> {
    let categories = store.categories().await.map_err(|_| Error::Internal)?;
    if categories.is_empty() {
        return Err(Error::NotFound);
    }

    let total_categories = categories.len();
    let list = CategoryList { success: true, categories: to_map(categories), total_categories };
    response::json(StatusCode::CREATED, &list)
}

#[cfg(test)]
mod tests {
    use crate::fixture::{self, get};
    use db::memory::MemoryStore;
    use hyper::StatusCode;

    #[tokio::test(flavor = "current_thread")]
    async fn lists_every_category() {
        let app = fixture::app();
        let (status, _, body) = get(&app, "/categories").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_categories"], 6);

        let categories = body["categories"].as_object().unwrap();
        let keys: Vec<_> = categories.keys().map(String::as_str).collect();
        assert_eq!(keys, ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(categories["1"], "Science");
        assert_eq!(categories["6"], "Sports");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn no_categories_is_not_found() {
        let app = crate::App::new(MemoryStore::new([], fixture::questions()));
        let (status, _, body) = get(&app, "/categories").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, fixture::envelope(404, "Not Found"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn store_failure_is_internal() {
        let app = fixture::app();
        app.store.set_broken(true);
        let (status, _, body) = get(&app, "/categories").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, fixture::envelope(500, "Internal Server Error"));
    }
}
