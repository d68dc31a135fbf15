//! In-process [`Store`] mirroring the PostgreSQL schema, including its NOT NULL constraints.

use crate::{error, Category, NewQuestion, Question, Store};
use core::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

struct Tables {
    categories: Vec<Category>,
    questions: Vec<Question>,
    next_id: i32,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    /// When set, every operation fails as if the connection were lost.
    broken: AtomicBool,
}

impl MemoryStore {
    pub fn new(categories: impl IntoIterator<Item = Category>, questions: impl IntoIterator<Item = Question>) -> Self {
        let mut categories: Vec<_> = categories.into_iter().collect();
        let mut questions: Vec<_> = questions.into_iter().collect();
        categories.sort_unstable_by_key(|category| category.id);
        questions.sort_unstable_by_key(|question| question.id);
        let next_id = questions.last().map_or(1, |question| question.id + 1);
        Self { tables: RwLock::new(Tables { categories, questions, next_id }), broken: AtomicBool::new(false) }
    }

    /// Makes every subsequent operation fail with [`error::Error::Fatal`] until reset.
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::Relaxed);
    }

    fn check(&self) -> error::Result<()> {
        if self.broken.load(Ordering::Relaxed) {
            Err(error::Error::Fatal)
        } else {
            Ok(())
        }
    }

    async fn filter_questions(&self, predicate: impl Fn(&Question) -> bool) -> error::Result<Vec<Question>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.questions.iter().filter(|question| predicate(question)).cloned().collect())
    }
}

impl Store for MemoryStore {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        self.check()?;
        Ok(self.tables.read().await.categories.clone())
    }

    async fn category(&self, id: i32) -> error::Result<Option<Category>> {
        self.check()?;
        Ok(self.tables.read().await.categories.iter().find(|category| category.id == id).cloned())
    }

    async fn questions(&self) -> error::Result<Vec<Question>> {
        self.filter_questions(|_| true).await
    }

    async fn question(&self, id: i32) -> error::Result<Option<Question>> {
        self.check()?;
        Ok(self.tables.read().await.questions.iter().find(|question| question.id == id).cloned())
    }

    async fn count_questions(&self) -> error::Result<usize> {
        self.check()?;
        Ok(self.tables.read().await.questions.len())
    }

    async fn questions_in_category(&self, category: i32) -> error::Result<Vec<Question>> {
        self.filter_questions(|question| question.category == category).await
    }

    async fn search_questions(&self, term: &str) -> error::Result<Vec<Question>> {
        let term = term.to_lowercase();
        self.filter_questions(|question| question.question.to_lowercase().contains(&term)).await
    }

    async fn insert_question(&self, question: &NewQuestion) -> error::Result<i32> {
        self.check()?;
        let NewQuestion {
            question: Some(text),
            answer: Some(answer),
            category: Some(category),
            difficulty: Some(difficulty),
        } = question
        else {
            return Err(error::Error::BadInput);
        };

        let mut tables = self.tables.write().await;
        let id = tables.next_id;
        tables.next_id += 1;
        tables.questions.push(Question {
            id,
            question: text.clone(),
            answer: answer.clone(),
            category: *category,
            difficulty: *difficulty,
        });
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> error::Result<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(index) = tables.questions.iter().position(|question| question.id == id) else {
            return Ok(false);
        };
        tables.questions.remove(index);
        Ok(true)
    }

    async fn quiz_candidates(&self, category: Option<i32>, previous: &[i32]) -> error::Result<Vec<Question>> {
        self.filter_questions(|question| {
            category.map_or(true, |category| question.category == category) && !previous.contains(&question.id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, MemoryStore, NewQuestion, Question, Store};

    fn store() -> MemoryStore {
        let categories = [
            Category { id: 2, kind: String::from("Art") },
            Category { id: 1, kind: String::from("Science") },
        ];
        let questions = [
            Question {
                id: 5,
                question: String::from("Who discovered penicillin?"),
                answer: String::from("Alexander Fleming"),
                category: 1,
                difficulty: 3,
            },
            Question {
                id: 2,
                question: String::from("La Giaconda is better known as what?"),
                answer: String::from("Mona Lisa"),
                category: 2,
                difficulty: 3,
            },
        ];
        MemoryStore::new(categories, questions)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn listings_are_ordered_by_id() {
        let store = store();
        let ids: Vec<_> = store.categories().await.unwrap().into_iter().map(|category| category.id).collect();
        assert_eq!(ids, [1, 2]);
        let ids: Vec<_> = store.questions().await.unwrap().into_iter().map(|question| question.id).collect();
        assert_eq!(ids, [2, 5]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn inserts_after_highest_id() {
        let store = store();
        let new = NewQuestion {
            question: Some(String::from("What is the largest lake in Africa?")),
            answer: Some(String::from("Lake Victoria")),
            category: Some(3),
            difficulty: Some(2),
        };
        assert_eq!(store.insert_question(&new).await.unwrap(), 6);
        assert_eq!(store.count_questions().await.unwrap(), 3);
        assert_eq!(store.insert_question(&NewQuestion::default()).await, Err(crate::error::Error::BadInput));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn broken_store_fails_everything() {
        let store = store();
        store.set_broken(true);
        assert!(store.questions().await.is_err());
        assert!(store.delete_question(5).await.is_err());
        store.set_broken(false);
        assert!(store.delete_question(5).await.unwrap());
        assert!(!store.delete_question(5).await.unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn candidates_skip_previous_questions() {
        let store = store();
        let all = store.quiz_candidates(None, &[5]).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 2);
        assert!(store.quiz_candidates(Some(1), &[5]).await.unwrap().is_empty());
        assert_eq!(store.search_questions("PENICILLIN").await.unwrap()[0].id, 5);
    }
}
