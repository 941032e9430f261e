//! In-memory implementation of AnnotationRepository.
//!
//! Backs API tests and local development without a MySQL instance.
//! Semantics mirror the MySQL store: auto-incrementing ids, newest-first
//! listing capped at the list limit, and a not-found error on deleting
//! an unknown id.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use marginalia_core::{
    Annotation, AnnotationRepository, CreateAnnotationRequest, Error, Result,
    ANNOTATION_LIST_LIMIT,
};

#[derive(Default)]
pub struct MemoryAnnotationRepository {
    annotations: Mutex<Vec<Annotation>>,
    next_id: AtomicI64,
}

impl MemoryAnnotationRepository {
    pub fn new() -> Self {
        Self {
            annotations: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Total number of stored annotations across all locators.
    pub fn len(&self) -> usize {
        self.annotations.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AnnotationRepository for MemoryAnnotationRepository {
    async fn list(&self, locator: &str) -> Result<Vec<Annotation>> {
        let store = self.annotations.lock().unwrap_or_else(|e| e.into_inner());
        let mut matching: Vec<Annotation> = store
            .iter()
            .filter(|a| a.locator == locator)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matching.truncate(ANNOTATION_LIST_LIMIT as usize);
        Ok(matching)
    }

    async fn create(&self, locator: &str, quote: &str, comment: &str) -> Result<i64> {
        CreateAnnotationRequest {
            quote: quote.to_string(),
            comment: comment.to_string(),
            locator: locator.to_string(),
        }
        .validate()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut store = self.annotations.lock().unwrap_or_else(|e| e.into_inner());
        store.push(Annotation {
            id,
            quote: quote.to_string(),
            comment: comment.to_string(),
            locator: locator.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut store = self.annotations.lock().unwrap_or_else(|e| e.into_inner());
        let before = store.len();
        store.retain(|a| a.id != id);
        if store.len() == before {
            return Err(Error::AnnotationNotFound(id));
        }
        Ok(())
    }
}
