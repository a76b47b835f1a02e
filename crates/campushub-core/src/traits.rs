// Boundary traits for the hosted record store
//
// These traits allow the typed collection APIs and the composite write
// coordinator to run against different backends:
// - The HTTP gateway for production
// - The in-memory implementation for tests and examples
//
// Records cross this boundary as JSON values; the typed layer above decodes
// them into the per-collection entity structs.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::session::Session;

/// Shape of a list request.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// PostgREST-style select expression; `*` selects whole rows and may
    /// embed related collections.
    pub select: String,
    /// Order by descending creation time (collections with `created_at`).
    pub newest_first: bool,
}

impl ListQuery {
    /// Whole rows, newest first; the default for record collections.
    pub fn newest_first() -> Self {
        Self {
            select: "*".to_string(),
            newest_first: true,
        }
    }

    /// Whole rows in remote order, for derived views without `created_at`.
    pub fn unordered() -> Self {
        Self {
            select: "*".to_string(),
            newest_first: false,
        }
    }

    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = select.into();
        self
    }
}

/// Trait for reading and writing named remote collections.
///
/// Every operation is one discrete awaited round trip; there is no local
/// cache, and callers re-list after mutation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List records according to the query.
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>>;

    /// Insert a record and return the stored row.
    async fn create(&self, collection: &str, fields: Value) -> Result<Value>;

    /// Patch a record by id and return the stored row.
    async fn update(&self, collection: &str, id: Uuid, fields: Value) -> Result<Value>;

    /// Delete a record by id. Requires only the identity; remote failures
    /// surface verbatim.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<()>;

    /// Exact number of records in a collection, without fetching rows.
    async fn count(&self, collection: &str) -> Result<u64>;

    /// First record whose `column` equals `value`, if any.
    async fn find_by(&self, collection: &str, column: &str, value: &str)
        -> Result<Option<Value>>;
}

/// Trait supplying the current session.
///
/// Session issuance and refresh belong to the external auth provider;
/// implementations only report what is currently held.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session, if any. `None` means the user must log in again.
    async fn current(&self) -> Option<Session>;
}
