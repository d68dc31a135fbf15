//! Seeded application and request helpers shared by the handler tests.

use crate::App;
use db::{memory::MemoryStore, Category, Question};
use http_body_util::{BodyExt, Full};
use hyper::{body::Bytes, HeaderMap, Method, Request, StatusCode};
use serde_json::{json, Value};

pub fn categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .into_iter()
        .zip(1..)
        .map(|(kind, id)| Category { id, kind: String::from(kind) })
        .collect()
}

/// Nineteen questions, three of which belong to the first category.
pub fn questions() -> Vec<Question> {
    const QUESTIONS: [(&str, &str, i32, i32); 19] = [
        ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
        ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
        ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
        ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
        ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
        ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
        ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        ("What actor did author Anne Rice first denounce, then praise in the role of Lestat?", "Tom Cruise", 5, 4),
        ("What was the title of the 1990 fantasy directed by Tim Burton?", "Edward Scissorhands", 5, 3),
        ("Which country hosted the first Winter Olympics in 1924?", "France", 6, 3),
    ];

    QUESTIONS
        .into_iter()
        .zip(1..)
        .map(|((question, answer, category, difficulty), id)| Question {
            id,
            question: String::from(question),
            answer: String::from(answer),
            category,
            difficulty,
        })
        .collect()
}

pub fn app() -> App<MemoryStore> {
    App::new(MemoryStore::new(categories(), questions()))
}

pub fn envelope(code: u16, message: &str) -> Value {
    json!({ "success": false, "error": code, "message": message })
}

/// Sends a raw request and decodes the JSON reply. Empty replies decode as `null`.
pub async fn send(app: &App<MemoryStore>, method: Method, uri: &str, body: Vec<u8>) -> (StatusCode, HeaderMap, Value) {
    let req = Request::builder().method(method).uri(uri).body(Full::new(Bytes::from(body))).unwrap();
    let (parts, body) = app.respond(req).await.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (parts.status, parts.headers, json)
}

pub async fn get(app: &App<MemoryStore>, uri: &str) -> (StatusCode, HeaderMap, Value) {
    send(app, Method::GET, uri, Vec::new()).await
}

pub async fn post(app: &App<MemoryStore>, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
    send(app, Method::POST, uri, serde_json::to_vec(&body).unwrap()).await
}
