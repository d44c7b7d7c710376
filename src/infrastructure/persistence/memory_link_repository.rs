//! In-memory implementation of link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::StoreError;
use crate::domain::repositories::LinkRepository;

#[derive(Default)]
struct Tables {
    by_short: HashMap<String, Link>,
    /// original URL → short code
    by_original: HashMap<String, String>,
}

/// Process-local repository backed by two hash maps behind one mutex.
///
/// Both keys are checked and written under the same lock, so `create` is
/// atomic with respect to the short-code and original-URL uniqueness rules.
/// Data is lost when the process exits.
#[derive(Default)]
pub struct MemoryLinkRepository {
    tables: Mutex<Tables>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.by_short.len()).unwrap_or(0)
    }

    /// Returns true if no links are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        if new_link.code.is_empty() {
            return Err(StoreError::ConstraintViolation(
                "short code must not be empty".to_string(),
            ));
        }
        if new_link.original.is_empty() {
            return Err(StoreError::ConstraintViolation(
                "original URL must not be empty".to_string(),
            ));
        }

        let mut tables = self.lock()?;

        if tables.by_short.contains_key(&new_link.code) {
            return Err(StoreError::DuplicateCode);
        }
        if tables.by_original.contains_key(&new_link.original) {
            return Err(StoreError::DuplicateOriginal);
        }

        let link = new_link.into_link();
        tables
            .by_original
            .insert(link.original.clone(), link.short.clone());
        tables.by_short.insert(link.short.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_short(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.lock()?.by_short.get(code).cloned())
    }

    async fn find_by_original(&self, original: &str) -> Result<Option<Link>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .by_original
            .get(original)
            .and_then(|code| tables.by_short.get(code))
            .cloned())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        match tables.by_short.get_mut(code) {
            Some(link) => {
                link.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
