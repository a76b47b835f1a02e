// Composite write coordinator for scholarships
//
// A scholarship is a base record plus at most one eligibility and one
// benefits sub-record. The base write always comes first (its generated id
// tags the dependents) and its outcome is authoritative for the call. On
// create, dependent failures are reported in the result instead of failing
// the call; on update they propagate.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use campushub_core::error::{Result, StoreError};
use campushub_core::scholarship::{NewScholarship, Scholarship, ScholarshipPatch};
use campushub_core::traits::{ListQuery, RecordStore};

use crate::collections::{
    decode, decode_rows, encode, SCHOLARSHIPS, SCHOLARSHIP_BENEFITS, SCHOLARSHIP_ELIGIBILITY,
};

/// Embed expression pulling both sub-records with the base rows.
const LIST_SELECT: &str = "*,scholarship_eligibility(*),scholarship_benefits(*)";

/// A dependent write that failed while the base record succeeded.
#[derive(Debug)]
pub struct DependentFailure {
    pub collection: &'static str,
    pub error: StoreError,
}

/// Outcome of a composite create: the stored base record plus any dependent
/// writes that failed. Callers can re-submit the dependents instead of
/// silently losing them.
#[derive(Debug)]
pub struct ScholarshipWrite {
    pub scholarship: Scholarship,
    pub dependent_failures: Vec<DependentFailure>,
}

impl ScholarshipWrite {
    /// True when the base record and every supplied dependent were stored.
    pub fn is_consistent(&self) -> bool {
        self.dependent_failures.is_empty()
    }
}

/// Typed facade over the scholarships composite.
#[derive(Clone)]
pub struct ScholarshipsApi {
    store: Arc<dyn RecordStore>,
}

impl ScholarshipsApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// List scholarships with their sub-records embedded, newest first.
    pub async fn list(&self) -> Result<Vec<Scholarship>> {
        let rows = self
            .store
            .list(
                SCHOLARSHIPS,
                ListQuery::newest_first().with_select(LIST_SELECT),
            )
            .await?;
        decode_rows(SCHOLARSHIPS, rows)
    }

    /// Create the base record, then insert each supplied dependent tagged
    /// with the new base id. A dependent failure does not roll back the base
    /// write; it is reported in the result.
    pub async fn create(&self, scholarship: NewScholarship) -> Result<ScholarshipWrite> {
        let fields = encode(SCHOLARSHIPS, &scholarship)?;
        let row = self.store.create(SCHOLARSHIPS, fields).await?;
        let created: Scholarship = decode(SCHOLARSHIPS, row)?;

        let mut dependent_failures = Vec::new();
        if let Some(eligibility) = &scholarship.eligibility {
            if let Err(error) = self
                .insert_dependent(SCHOLARSHIP_ELIGIBILITY, created.id, eligibility)
                .await
            {
                warn!(scholarship_id = %created.id, %error, "eligibility insert failed; scholarship saved without it");
                dependent_failures.push(DependentFailure {
                    collection: SCHOLARSHIP_ELIGIBILITY,
                    error,
                });
            }
        }
        if let Some(benefits) = &scholarship.benefits {
            if let Err(error) = self
                .insert_dependent(SCHOLARSHIP_BENEFITS, created.id, benefits)
                .await
            {
                warn!(scholarship_id = %created.id, %error, "benefits insert failed; scholarship saved without it");
                dependent_failures.push(DependentFailure {
                    collection: SCHOLARSHIP_BENEFITS,
                    error,
                });
            }
        }

        Ok(ScholarshipWrite {
            scholarship: created,
            dependent_failures,
        })
    }

    /// Update the base record, then upsert each supplied dependent. Dependent
    /// errors propagate here, unlike on create.
    pub async fn update(&self, id: Uuid, patch: ScholarshipPatch) -> Result<Scholarship> {
        let fields = encode(SCHOLARSHIPS, &patch)?;
        let row = self.store.update(SCHOLARSHIPS, id, fields).await?;
        let updated: Scholarship = decode(SCHOLARSHIPS, row)?;

        if let Some(eligibility) = &patch.eligibility {
            self.upsert_dependent(SCHOLARSHIP_ELIGIBILITY, id, eligibility)
                .await?;
        }
        if let Some(benefits) = &patch.benefits {
            self.upsert_dependent(SCHOLARSHIP_BENEFITS, id, benefits)
                .await?;
        }
        Ok(updated)
    }

    /// Delete the base record; the remote cascades to the sub-records.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(SCHOLARSHIPS, id).await
    }

    async fn insert_dependent<T: Serialize>(
        &self,
        collection: &'static str,
        scholarship_id: Uuid,
        fields: &T,
    ) -> Result<()> {
        let mut value = encode(collection, fields)?;
        tag_scholarship(&mut value, scholarship_id);
        self.store.create(collection, value).await?;
        Ok(())
    }

    /// Insert-or-update decided by an existence probe, not an atomic upsert.
    /// A concurrent editor can race the probe; accepted under the
    /// single-admin usage this dashboard sees.
    async fn upsert_dependent<T: Serialize>(
        &self,
        collection: &'static str,
        scholarship_id: Uuid,
        fields: &T,
    ) -> Result<()> {
        let existing = self
            .store
            .find_by(collection, "scholarship_id", &scholarship_id.to_string())
            .await?;
        match existing {
            Some(row) => {
                let dependent_id = record_id(collection, &row)?;
                debug!(collection, %dependent_id, "updating existing sub-record");
                let value = encode(collection, fields)?;
                // goes through the normal update path, so the modification
                // time is stamped
                self.store.update(collection, dependent_id, value).await?;
            }
            None => {
                debug!(collection, %scholarship_id, "no existing sub-record, inserting");
                self.insert_dependent(collection, scholarship_id, fields)
                    .await?;
            }
        }
        Ok(())
    }
}

fn tag_scholarship(value: &mut Value, scholarship_id: Uuid) {
    if let Value::Object(map) = value {
        map.insert("scholarship_id".to_string(), json!(scholarship_id));
    }
}

fn record_id(collection: &str, row: &Value) -> Result<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StoreError::decode(collection, "row is missing a readable id"))
}
