pub mod error;

#[cfg(feature = "memory")]
pub mod memory;

use core::future::Future;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};

pub use model::{Category, NewQuestion, Question};
pub use tokio_postgres::{tls::NoTls, Config};

/// Persistence operations required by the request handlers. Every listing is ordered by
/// identifier so that pagination is stable.
pub trait Store: Send + Sync {
    fn categories(&self) -> impl Future<Output = error::Result<Vec<Category>>> + Send;

    fn category(&self, id: i32) -> impl Future<Output = error::Result<Option<Category>>> + Send;

    fn questions(&self) -> impl Future<Output = error::Result<Vec<Question>>> + Send;

    fn question(&self, id: i32) -> impl Future<Output = error::Result<Option<Question>>> + Send;

    fn count_questions(&self) -> impl Future<Output = error::Result<usize>> + Send;

    fn questions_in_category(&self, category: i32) -> impl Future<Output = error::Result<Vec<Question>>> + Send;

    /// Questions whose text contains `term`, ignoring case.
    fn search_questions(&self, term: &str) -> impl Future<Output = error::Result<Vec<Question>>> + Send;

    /// Inserts the question and returns its new identifier.
    fn insert_question(&self, question: &NewQuestion) -> impl Future<Output = error::Result<i32>> + Send;

    /// Returns `false` if there was nothing to delete.
    fn delete_question(&self, id: i32) -> impl Future<Output = error::Result<bool>> + Send;

    /// Questions not yet asked, optionally restricted to a single category.
    fn quiz_candidates(
        &self,
        category: Option<i32>,
        previous: &[i32],
    ) -> impl Future<Output = error::Result<Vec<Question>>> + Send;
}

/// PostgreSQL-backed [`Store`]. Each operation checks out its own pooled connection, which is
/// returned to the pool as soon as the operation completes.
pub struct Database(Pool);

fn deserialize_question_from_row(row: &tokio_postgres::Row) -> Result<Question, tokio_postgres::Error> {
    let id = row.try_get("id")?;
    let question = row.try_get("question")?;
    let answer = row.try_get("answer")?;
    let category = row.try_get("category")?;
    let difficulty = row.try_get("difficulty")?;
    Ok(Question { id, question, answer, category, difficulty })
}

fn deserialize_category_from_row(row: &tokio_postgres::Row) -> Result<Category, tokio_postgres::Error> {
    let id = row.try_get("id")?;
    let kind = row.try_get("type")?;
    Ok(Category { id, kind })
}

fn deserialize_questions(rows: &[tokio_postgres::Row]) -> error::Result<Vec<Question>> {
    Ok(rows.iter().map(deserialize_question_from_row).collect::<Result<_, _>>()?)
}

impl Database {
    /// Creates a pool of at most `size` connections. No connection is opened until first use.
    pub fn connect(config: Config, size: usize) -> error::Result<Self> {
        let manager = Manager::from_config(config, NoTls, ManagerConfig { recycling_method: RecyclingMethod::Fast });
        let pool = Pool::builder(manager).max_size(size).build().map_err(|err| {
            log::error!("cannot build connection pool: {err}");
            error::Error::Fatal
        })?;
        Ok(Self(pool))
    }

    /// Creates the tables if they are missing and seeds the fixed categories.
    pub async fn init_schema(&self) -> error::Result<()> {
        let client = self.0.get().await?;
        client.batch_execute(include_str!("../schema.sql")).await?;
        Ok(())
    }
}

impl Store for Database {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        let client = self.0.get().await?;
        let rows = client.query("SELECT id, type FROM categories ORDER BY id", &[]).await?;
        Ok(rows.iter().map(deserialize_category_from_row).collect::<Result<_, _>>()?)
    }

    async fn category(&self, id: i32) -> error::Result<Option<Category>> {
        let client = self.0.get().await?;
        let Some(row) = client.query_opt("SELECT id, type FROM categories WHERE id = $1", &[&id]).await? else {
            return Ok(None);
        };
        Ok(Some(deserialize_category_from_row(&row)?))
    }

    async fn questions(&self) -> error::Result<Vec<Question>> {
        let client = self.0.get().await?;
        let rows = client
            .query("SELECT id, question, answer, category, difficulty FROM questions ORDER BY id", &[])
            .await?;
        deserialize_questions(&rows)
    }

    async fn question(&self, id: i32) -> error::Result<Option<Question>> {
        let client = self.0.get().await?;
        let Some(row) = client
            .query_opt("SELECT id, question, answer, category, difficulty FROM questions WHERE id = $1", &[&id])
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(deserialize_question_from_row(&row)?))
    }

    async fn count_questions(&self) -> error::Result<usize> {
        let client = self.0.get().await?;
        let count: i64 = client.query_one("SELECT COUNT(*) AS count FROM questions", &[]).await?.try_get("count")?;
        usize::try_from(count).map_err(|_| error::Error::Fatal)
    }

    async fn questions_in_category(&self, category: i32) -> error::Result<Vec<Question>> {
        let client = self.0.get().await?;
        let rows = client
            .query(
                "SELECT id, question, answer, category, difficulty FROM questions WHERE category = $1 ORDER BY id",
                &[&category],
            )
            .await?;
        deserialize_questions(&rows)
    }

    async fn search_questions(&self, term: &str) -> error::Result<Vec<Question>> {
        // Plain substring search: `%` and `_` in the term must not act as wildcards.
        let client = self.0.get().await?;
        let rows = client
            .query(
                "SELECT id, question, answer, category, difficulty FROM questions \
                 WHERE strpos(lower(question), lower($1)) > 0 ORDER BY id",
                &[&term],
            )
            .await?;
        deserialize_questions(&rows)
    }

    async fn insert_question(&self, question: &NewQuestion) -> error::Result<i32> {
        let NewQuestion { question, answer, category, difficulty } = question;
        let client = self.0.get().await?;
        let row = client
            .query_one(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4) RETURNING id",
                &[question, answer, category, difficulty],
            )
            .await?;
        Ok(row.try_get("id")?)
    }

    async fn delete_question(&self, id: i32) -> error::Result<bool> {
        let client = self.0.get().await?;
        let deleted = client.execute("DELETE FROM questions WHERE id = $1", &[&id]).await?;
        Ok(deleted != 0)
    }

    async fn quiz_candidates(&self, category: Option<i32>, previous: &[i32]) -> error::Result<Vec<Question>> {
        let client = self.0.get().await?;
        let rows = match category {
            Some(category) => {
                client
                    .query(
                        "SELECT id, question, answer, category, difficulty FROM questions \
                         WHERE category = $1 AND id <> ALL($2) ORDER BY id",
                        &[&category, &previous],
                    )
                    .await?
            }
            None => {
                client
                    .query(
                        "SELECT id, question, answer, category, difficulty FROM questions \
                         WHERE id <> ALL($1) ORDER BY id",
                        &[&previous],
                    )
                    .await?
            }
        };
        deserialize_questions(&rows)
    }
}
