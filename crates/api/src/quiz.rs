use crate::{
    error::{self, Error},
    util::response,
};
use db::{Question, Store};
use http_body_util::Full;
use hyper::{body::Bytes, Response, StatusCode};
use model::quiz::QuizRequest;
use rand::seq::SliceRandom;
use serde::{Serialize, Serializer};

/// An exhausted round is reported as `false` in place of a question.
fn question_or_false<S: Serializer>(question: &Option<&Question>, serializer: S) -> Result<S::Ok, S::Error> {
    match question {
        Some(question) => question.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[derive(Serialize)]
struct NextQuestion<'a> {
    success: bool,
    previous_questions: &'a [i32],
    #[serde(serialize_with = "question_or_false")]
    question: Option<&'a Question>,
}

/// Draws a random question that has not been asked yet in this round.
pub async fn next<S: Store>(store: &S, body: &[u8]) -> error::Result<Response<Full<Bytes>>> {
    let QuizRequest { quiz_category, previous_questions } = serde_json::from_slice(body).map_err(|err| {
        log::debug!("malformed quiz request: {err}");
        Error::BadRequest
    })?;
    let category = quiz_category.as_ref().ok_or(Error::NotFound)?.filter();

    let candidates = store.quiz_candidates(category, &previous_questions).await.map_err(|_| Error::Internal)?;
    let question = candidates.choose(&mut rand::thread_rng());
    if question.is_none() {
        log::debug!("no questions left in round for category {category:?}");
    }

    response::json(StatusCode::OK, &NextQuestion { success: true, previous_questions: &previous_questions, question })
}
