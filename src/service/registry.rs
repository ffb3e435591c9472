//! Number registry service.
//!
//! Holds the ordered, de-duplicated list of destination numbers. Every
//! mutation is a read-modify-flush under one writer lock: the new list is
//! built from the committed snapshot, written to the store, and only then
//! published. A failed write therefore leaves readers on the old list.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{PhoneNumber, parse_all};
use crate::error::{AppError, Result};
use crate::storage::NumberStore;

/// Registry mutation kinds, used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Add,
    Remove,
    Replace,
}

impl Mutation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        }
    }
}

/// Shared registry of destination numbers.
pub struct NumberRegistry {
    /// Last durably written list.
    committed: RwLock<Vec<PhoneNumber>>,
    /// Serializes read-modify-flush cycles.
    writer: Mutex<()>,
    /// Backing store.
    store: Arc<dyn NumberStore>,
}

impl NumberRegistry {
    /// Load the registry from the store.
    ///
    /// If the store has never held a list, `initial` is de-duplicated,
    /// persisted and used instead.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank seed entry and `Persistence` if the
    /// store cannot be read or the seed cannot be written.
    pub async fn load(store: Arc<dyn NumberStore>, initial: &[String]) -> Result<Self> {
        let numbers = if let Some(stored) = store.load().await? {
            dedup(stored)
        } else {
            let seed = dedup(parse_all(initial.iter().cloned())?);
            store.save(&seed).await?;
            info!(count = seed.len(), "Seeded number registry from configuration");
            seed
        };

        info!(
            backend = store.backend_name(),
            count = numbers.len(),
            "Number registry loaded"
        );

        Ok(Self {
            committed: RwLock::new(numbers),
            writer: Mutex::new(()),
            store,
        })
    }

    /// Snapshot of the current numbers in fan-out order.
    #[must_use]
    pub fn list(&self) -> Vec<PhoneNumber> {
        self.committed.read().clone()
    }

    /// Whether `number` is registered.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.committed.read().iter().any(|n| n.as_str() == number)
    }

    /// Number of registered destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.read().len()
    }

    /// Whether no destination is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.read().is_empty()
    }

    /// Append `number` if absent and return the updated list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank number and `Persistence` if the
    /// store write fails.
    pub async fn add(&self, number: &str) -> Result<Vec<PhoneNumber>> {
        let number = PhoneNumber::parse(number)?;
        let _writer = self.writer.lock().await;

        let current = self.list();
        if current.contains(&number) {
            debug!(%number, "Number already registered");
            return Ok(current);
        }

        let mut next = current;
        next.push(number.clone());
        let next = self.commit(next, Mutation::Add).await?;
        info!(%number, count = next.len(), "Number added");
        Ok(next)
    }

    /// Remove `number` if present and return the updated list.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store write fails.
    pub async fn remove(&self, number: &str) -> Result<Vec<PhoneNumber>> {
        let _writer = self.writer.lock().await;

        let current = self.list();
        if !current.iter().any(|n| n.as_str() == number) {
            debug!(number, "Number not registered, nothing to remove");
            return Ok(current);
        }

        let next: Vec<PhoneNumber> = current
            .into_iter()
            .filter(|n| n.as_str() != number)
            .collect();
        let next = self.commit(next, Mutation::Remove).await?;
        info!(number, count = next.len(), "Number removed");
        Ok(next)
    }

    /// Replace the whole registry with the de-duplicated `numbers`, keeping
    /// the first occurrence of each.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any entry is blank (nothing is changed) and
    /// `Persistence` if the store write fails.
    pub async fn replace_all<I, S>(&self, numbers: I) -> Result<Vec<PhoneNumber>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = dedup(parse_all(numbers)?);
        let _writer = self.writer.lock().await;

        let next = self.commit(next, Mutation::Replace).await?;
        info!(count = next.len(), "Number registry replaced");
        Ok(next)
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store health check fails.
    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await.map_err(AppError::from)
    }

    /// Flush `next` and publish it. Caller must hold `writer`.
    async fn commit(
        &self,
        next: Vec<PhoneNumber>,
        mutation: Mutation,
    ) -> Result<Vec<PhoneNumber>> {
        if let Err(e) = self.store.save(&next).await {
            tracing::error!(
                op = mutation.as_str(),
                error = %e,
                "Failed to persist number registry"
            );
            return Err(AppError::Persistence(e));
        }

        metrics::counter!("intercom_registry_mutations_total", "op" => mutation.as_str())
            .increment(1);

        let mut committed = self.committed.write();
        committed.clone_from(&next);
        Ok(next)
    }
}

/// Drop repeated numbers, keeping first-seen order.
fn dedup(numbers: Vec<PhoneNumber>) -> Vec<PhoneNumber> {
    let mut seen = HashSet::with_capacity(numbers.len());
    numbers
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}
