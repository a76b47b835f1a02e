// Typed collection APIs
//
// Per-collection facades over the record store. Each takes the store handle
// by injection, so tests run them against the in-memory store; decoding into
// the entity structs is the shape validation at this boundary.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use campushub_core::error::{Result, StoreError};
use campushub_core::event::{Event, EventPatch, NewEvent, PromoChannel};
use campushub_core::partner_event::{NewPartnerEvent, PartnerEvent, PartnerEventPatch};
use campushub_core::signup::Signup;
use campushub_core::clicks::{ItemClicks, PlatformClicks};
use campushub_core::traits::{ListQuery, RecordStore};

// Collection names
pub const EVENTS: &str = "events";
pub const HACKATHONS: &str = "hackathons";
pub const SCHOLARSHIPS: &str = "scholarships";
pub const SCHOLARSHIP_ELIGIBILITY: &str = "scholarship_eligibility";
pub const SCHOLARSHIP_BENEFITS: &str = "scholarship_benefits";
pub const PARTNER_EVENTS: &str = "partner_events";
/// Some deployments still hold the collection under its original name with a
/// space; every partner-event operation falls back to it.
pub const PARTNER_EVENTS_LEGACY: &str = "partner events";
pub const SIGNUPS: &str = "signups";
pub const LINK_CLICKS: &str = "link_clicks";
pub const CLICKS_BY_PLATFORM: &str = "link_clicks_by_platform";
pub const CLICKS_BY_ITEM: &str = "link_clicks_by_item";

pub(crate) fn decode<T: DeserializeOwned>(collection: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| StoreError::decode(collection, e))
}

pub(crate) fn decode_rows<T: DeserializeOwned>(
    collection: &str,
    rows: Vec<Value>,
) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| decode(collection, row))
        .collect()
}

pub(crate) fn encode<T: Serialize>(collection: &str, fields: &T) -> Result<Value> {
    serde_json::to_value(fields).map_err(|e| StoreError::decode(collection, e))
}

// ============================================================================
// EventsApi - events and hackathons
// ============================================================================

/// Typed facade over the events collection. Hackathons share the schema in a
/// parallel collection, so the same facade serves both.
#[derive(Clone)]
pub struct EventsApi {
    store: Arc<dyn RecordStore>,
    collection: &'static str,
}

impl EventsApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            collection: EVENTS,
        }
    }

    pub fn hackathons(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            collection: HACKATHONS,
        }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let rows = self
            .store
            .list(self.collection, ListQuery::newest_first())
            .await?;
        decode_rows(self.collection, rows)
    }

    pub async fn create(&self, event: NewEvent) -> Result<Event> {
        let fields = encode(self.collection, &event)?;
        let row = self.store.create(self.collection, fields).await?;
        decode(self.collection, row)
    }

    pub async fn update(&self, id: Uuid, patch: EventPatch) -> Result<Event> {
        let fields = encode(self.collection, &patch)?;
        let row = self.store.update(self.collection, id, fields).await?;
        decode(self.collection, row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(self.collection, id).await
    }

    /// Toggle the highlight flag, independent of the edit form.
    pub async fn set_highlighted(&self, id: Uuid, highlighted: bool) -> Result<Event> {
        self.update(id, EventPatch::highlight(highlighted)).await
    }

    /// Mark one promotion channel as posted (or not).
    pub async fn set_posted(
        &self,
        id: Uuid,
        channel: PromoChannel,
        posted: bool,
    ) -> Result<Event> {
        self.update(id, EventPatch::posted(channel, posted)).await
    }
}

// ============================================================================
// PartnerEventsApi - with the legacy collection-name fallback
// ============================================================================

/// Typed facade over the partner events collection.
///
/// Every operation tries the primary name first and falls back to the legacy
/// spaced name on any failure, synchronous or not; when both fail, the
/// fallback's error surfaces.
#[derive(Clone)]
pub struct PartnerEventsApi {
    store: Arc<dyn RecordStore>,
}

impl PartnerEventsApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<PartnerEvent>> {
        match self.store.list(PARTNER_EVENTS, ListQuery::newest_first()).await {
            Ok(rows) => decode_rows(PARTNER_EVENTS, rows),
            Err(primary_err) => {
                debug!(error = %primary_err, "partner events list failed, trying legacy name");
                let rows = self
                    .store
                    .list(PARTNER_EVENTS_LEGACY, ListQuery::newest_first())
                    .await?;
                decode_rows(PARTNER_EVENTS_LEGACY, rows)
            }
        }
    }

    pub async fn create(&self, event: NewPartnerEvent) -> Result<PartnerEvent> {
        let fields = encode(PARTNER_EVENTS, &event)?;
        match self.store.create(PARTNER_EVENTS, fields.clone()).await {
            Ok(row) => decode(PARTNER_EVENTS, row),
            Err(primary_err) => {
                debug!(error = %primary_err, "partner events create failed, trying legacy name");
                let row = self.store.create(PARTNER_EVENTS_LEGACY, fields).await?;
                decode(PARTNER_EVENTS_LEGACY, row)
            }
        }
    }

    pub async fn update(&self, id: Uuid, patch: PartnerEventPatch) -> Result<PartnerEvent> {
        let fields = encode(PARTNER_EVENTS, &patch)?;
        match self.store.update(PARTNER_EVENTS, id, fields.clone()).await {
            Ok(row) => decode(PARTNER_EVENTS, row),
            Err(primary_err) => {
                debug!(error = %primary_err, "partner events update failed, trying legacy name");
                let row = self.store.update(PARTNER_EVENTS_LEGACY, id, fields).await?;
                decode(PARTNER_EVENTS_LEGACY, row)
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.store.delete(PARTNER_EVENTS, id).await {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                debug!(error = %primary_err, "partner events delete failed, trying legacy name");
                self.store.delete(PARTNER_EVENTS_LEGACY, id).await
            }
        }
    }
}

// ============================================================================
// SignupsApi - read and delete only
// ============================================================================

/// Signups are created by the public site; the dashboard lists and deletes.
#[derive(Clone)]
pub struct SignupsApi {
    store: Arc<dyn RecordStore>,
}

impl SignupsApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Signup>> {
        let rows = self.store.list(SIGNUPS, ListQuery::newest_first()).await?;
        decode_rows(SIGNUPS, rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(SIGNUPS, id).await
    }
}

// ============================================================================
// LinkTrackingApi - analytics feeds
// ============================================================================

/// Feeds for the link-tracking view: the two derived click views plus the
/// exact total. Aggregation itself happens in the core analytics module.
#[derive(Clone)]
pub struct LinkTrackingApi {
    store: Arc<dyn RecordStore>,
}

impl LinkTrackingApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn clicks_by_platform(&self) -> Result<Vec<PlatformClicks>> {
        let rows = self
            .store
            .list(CLICKS_BY_PLATFORM, ListQuery::unordered())
            .await?;
        decode_rows(CLICKS_BY_PLATFORM, rows)
    }

    pub async fn clicks_by_item(&self) -> Result<Vec<ItemClicks>> {
        let rows = self
            .store
            .list(CLICKS_BY_ITEM, ListQuery::unordered())
            .await?;
        decode_rows(CLICKS_BY_ITEM, rows)
    }

    pub async fn total_clicks(&self) -> Result<u64> {
        self.store.count(LINK_CLICKS).await
    }
}

// ============================================================================
// DashboardStats - counts that never break the landing page
// ============================================================================

/// Per-collection counts for the dashboard landing page. A failed count
/// degrades to zero with a warning instead of failing the page.
#[derive(Clone)]
pub struct DashboardStats {
    store: Arc<dyn RecordStore>,
}

impl DashboardStats {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn events_count(&self) -> u64 {
        self.count_or_zero(EVENTS).await
    }

    pub async fn hackathons_count(&self) -> u64 {
        self.count_or_zero(HACKATHONS).await
    }

    pub async fn scholarships_count(&self) -> u64 {
        self.count_or_zero(SCHOLARSHIPS).await
    }

    pub async fn signups_count(&self) -> u64 {
        self.count_or_zero(SIGNUPS).await
    }

    async fn count_or_zero(&self, collection: &str) -> u64 {
        match self.store.count(collection).await {
            Ok(count) => count,
            Err(err) => {
                warn!(collection, error = %err, "count failed, showing zero");
                0
            }
        }
    }
}

// ============================================================================
// ItemNamesApi - lightweight id+name lookups
// ============================================================================

/// Display name of a tracked item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName {
    pub id: String,
    pub name: String,
}

/// Lightweight id+name listings for display lookups (e.g. resolving item
/// ids in the link-tracking breakdown). Failures degrade to an empty list.
#[derive(Clone)]
pub struct ItemNamesApi {
    store: Arc<dyn RecordStore>,
}

impl ItemNamesApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn event_names(&self) -> Vec<ItemName> {
        self.names(EVENTS, "id, name").await
    }

    pub async fn hackathon_names(&self) -> Vec<ItemName> {
        self.names(HACKATHONS, "id, name").await
    }

    pub async fn scholarship_names(&self) -> Vec<ItemName> {
        self.names(SCHOLARSHIPS, "id, title").await
    }

    async fn names(&self, collection: &str, select: &str) -> Vec<ItemName> {
        let rows = match self
            .store
            .list(collection, ListQuery::unordered().with_select(select))
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!(collection, error = %err, "name lookup failed, showing none");
                return Vec::new();
            }
        };
        rows.into_iter()
            .filter_map(|row| {
                let id = row.get("id")?.as_str()?.to_string();
                let name = row
                    .get("name")
                    .or_else(|| row.get("title"))?
                    .as_str()?
                    .to_string();
                Some(ItemName { id, name })
            })
            .collect()
    }
}
