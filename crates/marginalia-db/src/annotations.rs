//! MySQL implementation of AnnotationRepository.

use async_trait::async_trait;
use sqlx::MySqlPool;

use marginalia_core::{
    Annotation, AnnotationRepository, CreateAnnotationRequest, Error, Result,
    ANNOTATION_LIST_LIMIT,
};

pub struct MySqlAnnotationRepository {
    pool: MySqlPool,
}

impl MySqlAnnotationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnotationRepository for MySqlAnnotationRepository {
    async fn list(&self, locator: &str) -> Result<Vec<Annotation>> {
        let annotations = sqlx::query_as::<_, Annotation>(
            r#"
            SELECT id, quote, comment, locator, created_at
            FROM annotations
            WHERE locator = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(locator)
        .bind(ANNOTATION_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(annotations)
    }

    async fn create(&self, locator: &str, quote: &str, comment: &str) -> Result<i64> {
        CreateAnnotationRequest {
            quote: quote.to_string(),
            comment: comment.to_string(),
            locator: locator.to_string(),
        }
        .validate()?;

        let result = sqlx::query(
            "INSERT INTO annotations (quote, comment, locator) VALUES (?, ?, ?)",
        )
        .bind(quote)
        .bind(comment)
        .bind(locator)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.last_insert_id() as i64)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::AnnotationNotFound(id));
        }
        Ok(())
    }
}
