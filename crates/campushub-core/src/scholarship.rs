// Scholarship entity with its dependent sub-records
//
// A scholarship is a composite entity: the base record plus at most one
// eligibility and at most one benefits sub-record, related by a
// `scholarship_id` foreign key. Listing embeds the sub-records; the remote
// may represent an embed as a single object, an array of zero or one rows,
// or null, and all of those normalize to `Option<T>` here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Base scholarship record with embedded sub-records when listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free text ("€5,000", "full tuition"); never computed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "scholarship_eligibility",
        deserialize_with = "embedded_one",
        skip_serializing
    )]
    pub eligibility: Option<ScholarshipEligibility>,
    #[serde(
        default,
        rename = "scholarship_benefits",
        deserialize_with = "embedded_one",
        skip_serializing
    )]
    pub benefits: Option<ScholarshipBenefits>,
}

/// Eligibility sub-record, zero-or-one per scholarship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipEligibility {
    pub id: Uuid,
    pub scholarship_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Benefits sub-record, zero-or-one per scholarship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipBenefits {
    pub id: Uuid,
    pub scholarship_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Eligibility fields as written by the coordinator, which adds the
/// `scholarship_id` tag itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EligibilityFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

/// Benefits fields as written by the coordinator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenefitsFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perks: Option<String>,
}

/// Fields for creating a scholarship. Dependent payloads are split off by
/// the coordinator and never serialized with the base record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewScholarship {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing)]
    pub eligibility: Option<EligibilityFields>,
    #[serde(skip_serializing)]
    pub benefits: Option<BenefitsFields>,
}

/// Partial update for the base record plus optional dependent payloads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScholarshipPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing)]
    pub eligibility: Option<EligibilityFields>,
    #[serde(skip_serializing)]
    pub benefits: Option<BenefitsFields>,
}

/// Accepts an embedded sub-record as an object, an array of zero or one
/// rows, or null.
fn embedded_one<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(row)) => Some(row),
        Some(OneOrMany::Many(rows)) => rows.into_iter().next(),
    })
}
