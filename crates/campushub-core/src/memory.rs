// In-memory implementations for examples and testing
//
// These implementations keep all data in memory, making them suitable for:
// - Unit and integration tests that should not open sockets
// - Exercising the coordinator and typed APIs without a hosted backend

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::session::Session;
use crate::traits::{ListQuery, RecordStore, SessionProvider};

// ============================================================================
// InMemoryRecordStore - Collections in a HashMap
// ============================================================================

/// In-memory record store.
///
/// Rows live in a HashMap keyed by collection name, in insertion order.
/// Ids and creation timestamps are stamped on insert, mirroring the remote.
/// Collections can be marked as failing to exercise error paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `collection` fail with a remote error.
    pub async fn fail_collection(&self, collection: &str) {
        self.failing.write().await.insert(collection.to_string());
    }

    /// Pre-populate a collection (useful for testing).
    pub async fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), rows);
    }

    /// Snapshot of a collection in insertion order.
    pub async fn rows(&self, collection: &str) -> Vec<Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    async fn check_available(&self, collection: &str) -> Result<()> {
        if self.failing.read().await.contains(collection) {
            return Err(StoreError::remote(format!(
                "injected failure for {collection}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>> {
        self.check_available(collection).await?;
        let mut rows = self.rows(collection).await;
        if query.newest_first {
            rows.reverse();
        }
        if query.select.contains('*') {
            return Ok(rows);
        }
        let fields: Vec<&str> = query.select.split(',').map(str::trim).collect();
        Ok(rows.iter().map(|row| project(row, &fields)).collect())
    }

    async fn create(&self, collection: &str, fields: Value) -> Result<Value> {
        self.check_available(collection).await?;
        let mut row = into_object(collection, fields)?;
        row.entry("id").or_insert_with(|| json!(Uuid::new_v4()));
        row.entry("created_at").or_insert_with(|| json!(Utc::now()));
        let row = Value::Object(row);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, collection: &str, id: Uuid, fields: Value) -> Result<Value> {
        self.check_available(collection).await?;
        let patch = into_object(collection, fields)?;
        let mut collections = self.collections.write().await;
        let rows = collections
            .get_mut(collection)
            .ok_or(StoreError::RecordNotFound)?;
        let row = rows
            .iter_mut()
            .find(|row| row_id(row) == Some(id))
            .ok_or(StoreError::RecordNotFound)?;
        if let Value::Object(map) = row {
            for (key, value) in patch {
                map.insert(key, value);
            }
            // every in-memory collection has the column, so the stamp
            // always lands, as on a remote collection that has it
            map.insert("updated_at".to_string(), json!(Utc::now()));
        }
        Ok(row.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        self.check_available(collection).await?;
        if let Some(rows) = self.collections.write().await.get_mut(collection) {
            rows.retain(|row| row_id(row) != Some(id));
        }
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        self.check_available(collection).await?;
        Ok(self.rows(collection).await.len() as u64)
    }

    async fn find_by(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<Value>> {
        self.check_available(collection).await?;
        Ok(self
            .rows(collection)
            .await
            .into_iter()
            .find(|row| match row.get(column) {
                Some(Value::String(s)) => s == value,
                Some(other) => other.to_string() == value,
                None => false,
            }))
    }
}

fn into_object(collection: &str, fields: Value) -> Result<Map<String, Value>> {
    match fields {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::decode(
            collection,
            format!("expected an object payload, got {other}"),
        )),
    }
}

fn row_id(row: &Value) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn project(row: &Value, fields: &[&str]) -> Value {
    let mut out = Map::new();
    if let Value::Object(map) = row {
        for field in fields {
            if let Some(value) = map.get(*field) {
                out.insert((*field).to_string(), value.clone());
            }
        }
    }
    Value::Object(out)
}

// ============================================================================
// StaticSessionProvider - A fixed session, or none
// ============================================================================

/// Session provider holding one replaceable session.
///
/// Serves tests and single-token deployments where the token is provisioned
/// out of band.
#[derive(Debug, Default, Clone)]
pub struct StaticSessionProvider {
    session: Arc<RwLock<Option<Session>>>,
}

impl StaticSessionProvider {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Provider with no session; every gated operation fails
    /// `Unauthenticated`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.session.write().await = None;
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }
}
