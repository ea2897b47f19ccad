//! Fire identity types and id sources.
//!
//! Every merge produces a new record with a freshly generated id. Id
//! generation goes through [`IdSource`] so callers (and tests) can supply a
//! deterministic sequence instead of random UUIDs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fire identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FireId(pub String);

impl FireId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FireId {
    fn from(id: &str) -> Self {
        FireId(id.to_string())
    }
}

impl From<String> for FireId {
    fn from(id: String) -> Self {
        FireId(id)
    }
}

/// Source of ids for merged fire records.
pub trait IdSource {
    /// Produce the id for the next merged record.
    fn next_id(&self) -> FireId;
}

impl<T: IdSource + ?Sized> IdSource for &T {
    fn next_id(&self) -> FireId {
        (**self).next_id()
    }
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn next_id(&self) -> FireId {
        (**self).next_id()
    }
}

/// Random v4 UUIDs, hyphenated. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> FireId {
        FireId(uuid::Uuid::new_v4().to_string())
    }
}

/// Returns the same id on every call.
#[derive(Debug, Clone)]
pub struct FixedIdSource(pub String);

impl FixedIdSource {
    pub fn new(id: impl Into<String>) -> Self {
        FixedIdSource(id.into())
    }
}

impl IdSource for FixedIdSource {
    fn next_id(&self) -> FireId {
        FireId(self.0.clone())
    }
}

/// Monotonic ids of the form `<prefix>-<n>`, starting at 1.
#[derive(Debug)]
pub struct SequentialIdSource {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdSource {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> FireId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        FireId(format!("{}-{}", self.prefix, n))
    }
}
