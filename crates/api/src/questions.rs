use crate::{
    categories::{self, CategoryMap},
    error::{self, Error},
    page::paginate,
    util::response,
};
use db::{NewQuestion, Question, Store};
use http_body_util::Full;
use hyper::{body::Bytes, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

type Reply = error::Result<Response<Full<Bytes>>>;

#[derive(Serialize)]
struct QuestionPage<'a> {
    success: bool,
    questions: &'a [Question],
    total_questions: usize,
    categories: CategoryMap,
    /// Only meaningful for per-category listings.
    current_category: Option<&'a str>,
}

#[derive(Serialize)]
struct Deleted<'a> {
    success: bool,
    deleted: i32,
    questions: &'a [Question],
    total_questions: usize,
}

#[derive(Serialize)]
struct Created<'a> {
    success: bool,
    created: i32,
    questions: &'a [Question],
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults<'a> {
    success: bool,
    questions: &'a [Question],
    total_questions: usize,
    number_of_results: usize,
}

#[derive(Serialize)]
struct CategoryQuestions<'a> {
    success: bool,
    current_category: &'a str,
    questions: &'a [Question],
    /// Size of the returned page rather than of the whole category.
    total_questions: usize,
}

/// Payload of `POST /questions`. Search takes precedence: a truthy `searchTerm` turns the request
/// into a search even when question fields are present as well.
#[derive(Debug, PartialEq, Eq)]
enum QuestionsRequest {
    Search { term: String },
    Create(NewQuestion),
}

/// Text to search for, if `value` is truthy. Scalars are matched by their display form.
fn search_term(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(String::from("True")),
        Value::Number(num) => (num.as_f64() != Some(0.0)).then(|| num.to_string()),
        Value::String(text) => (!text.is_empty()).then_some(text),
        Value::Array(ref items) if items.is_empty() => None,
        Value::Object(ref fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

impl QuestionsRequest {
    fn from_slice(bytes: &[u8]) -> error::Result<Self> {
        let mut map: Map<String, Value> = serde_json::from_slice(bytes).map_err(|err| {
            log::debug!("malformed question submission: {err}");
            Error::BadRequest
        })?;

        if let Some(term) = map.remove("searchTerm").and_then(search_term) {
            return Ok(Self::Search { term });
        }

        // Malformed fields fail the insertion just like a schema violation would.
        let question = NewQuestion::deserialize(Value::Object(map)).map_err(|err| {
            log::debug!("rejected new question: {err}");
            Error::Unprocessable
        })?;
        Ok(Self::Create(question))
    }
}

pub async fn list<S: Store>(store: &S, page: i64) -> Reply {
    let questions = store.questions().await.map_err(|_| Error::Internal)?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(Error::NotFound);
    }

    let categories = store.categories().await.map_err(|_| Error::Internal)?;
    if categories.is_empty() {
        return Err(Error::NotFound);
    }

    response::json(
        StatusCode::CREATED,
        &QuestionPage {
            success: true,
            questions: current,
            total_questions: questions.len(),
            categories: categories::to_map(categories),
            current_category: None,
        },
    )
}

pub async fn delete<S: Store>(store: &S, id: i32, page: i64) -> Reply {
    let fail = || |_: db::error::Error| Error::BadRequest;
    store.question(id).await.map_err(|_| Error::BadRequest)?.ok_or(Error::NotFound)?;
    if !store.delete_question(id).await.map_err(|_| Error::BadRequest)? {
        // Someone else deleted it in the meantime.
        return Err(Error::NotFound);
    }
    log::info!("Deleted question {id}.");

    let questions = store.questions().await.map_err(|_| Error::BadRequest)?;
    let current = paginate(&questions, page);
    response::json(
        StatusCode::CREATED,
        &Deleted { success: true, deleted: id, questions: current, total_questions: questions.len() },
    )
}

/// Handles both question creation and question search, depending on the payload.
pub async fn submit<S: Store>(store: &S, body: &[u8], page: i64) -> Reply {
    match QuestionsRequest::from_slice(body)? {
        QuestionsRequest::Search { term } => search(store, &term, page).await,
        QuestionsRequest::Create(question) => create(store, &question, page).await,
    }
}

async fn search<S: Store>(store: &S, term: &str, page: i64) -> Reply {
    let matches = store.search_questions(term).await.map_err(|_| Error::Internal)?;
    let current = paginate(&matches, page);
    if current.is_empty() {
        return Err(Error::NotFound);
    }

    let total_questions = store.count_questions().await.map_err(|_| Error::Internal)?;
    response::json(
        StatusCode::CREATED,
        &SearchResults { success: true, questions: current, total_questions, number_of_results: matches.len() },
    )
}

async fn create<S: Store>(store: &S, question: &NewQuestion, page: i64) -> Reply {
    let created = store.insert_question(question).await.map_err(|_| Error::Unprocessable)?;
    log::info!("Created question {created}.");

    let questions = store.questions().await.map_err(|_| Error::Unprocessable)?;
    let current = paginate(&questions, page);
    response::json(
        StatusCode::CREATED,
        &Created { success: true, created, questions: current, total_questions: questions.len() },
    )
}

pub async fn by_category<S: Store>(store: &S, id: i32, page: i64) -> Reply {
    let category = store.category(id).await.map_err(|_| Error::Internal)?.ok_or(Error::NotFound)?;
    let questions = store.questions_in_category(id).await.map_err(|_| Error::Internal)?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(Error::NotFound);
    }

    response::json(
        StatusCode::CREATED,
        &CategoryQuestions {
            success: true,
            current_category: &category.kind,
            questions: current,
            total_questions: current.len(),
        },
    )
}
