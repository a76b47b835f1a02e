// Coordinator and typed-API tests against the in-memory store
//
// The composite write sequencing, the partner-events name fallback, and the
// degrade-to-empty lookups are all store-agnostic, so they run here without
// opening a socket.

use std::sync::Arc;

use serde_json::json;

use campushub_core::scholarship::{BenefitsFields, EligibilityFields};
use campushub_core::{
    InMemoryRecordStore, NewEvent, NewPartnerEvent, NewScholarship, PromoChannel,
    RecordStore, ScholarshipPatch,
};
use campushub_store::collections::{
    EVENTS, PARTNER_EVENTS, PARTNER_EVENTS_LEGACY, SCHOLARSHIP_BENEFITS,
    SCHOLARSHIP_ELIGIBILITY, SCHOLARSHIPS, SIGNUPS,
};
use campushub_store::{
    DashboardStats, EventsApi, ItemNamesApi, PartnerEventsApi, ScholarshipsApi,
};

fn store() -> Arc<InMemoryRecordStore> {
    Arc::new(InMemoryRecordStore::new())
}

fn scholarship_with_dependents() -> NewScholarship {
    NewScholarship {
        title: "Open Source Fellowship".into(),
        provider: Some("RustBridge".into()),
        eligibility: Some(EligibilityFields {
            requirements: Some("Active contributor".into()),
            ..EligibilityFields::default()
        }),
        benefits: Some(BenefitsFields {
            amount: Some("€5,000".into()),
            ..BenefitsFields::default()
        }),
        ..NewScholarship::default()
    }
}

#[tokio::test]
async fn composite_create_inserts_base_then_each_dependent() {
    let store = store();
    let api = ScholarshipsApi::new(store.clone());

    let write = api.create(scholarship_with_dependents()).await.unwrap();
    assert!(write.is_consistent());

    assert_eq!(store.rows(SCHOLARSHIPS).await.len(), 1);
    let base_id = write.scholarship.id.to_string();

    let eligibility = store.rows(SCHOLARSHIP_ELIGIBILITY).await;
    assert_eq!(eligibility.len(), 1);
    assert_eq!(eligibility[0]["scholarship_id"], json!(base_id));
    assert_eq!(eligibility[0]["requirements"], "Active contributor");

    let benefits = store.rows(SCHOLARSHIP_BENEFITS).await;
    assert_eq!(benefits.len(), 1);
    assert_eq!(benefits[0]["scholarship_id"], json!(base_id));
}

#[tokio::test]
async fn composite_create_reports_dependent_failure_without_rolling_back() {
    let store = store();
    store.fail_collection(SCHOLARSHIP_ELIGIBILITY).await;
    let api = ScholarshipsApi::new(store.clone());

    let write = api.create(scholarship_with_dependents()).await.unwrap();
    assert!(!write.is_consistent());
    assert_eq!(write.dependent_failures.len(), 1);
    assert_eq!(
        write.dependent_failures[0].collection,
        SCHOLARSHIP_ELIGIBILITY
    );

    // the base write stands, and the other dependent still landed
    assert_eq!(store.rows(SCHOLARSHIPS).await.len(), 1);
    assert_eq!(store.rows(SCHOLARSHIP_BENEFITS).await.len(), 1);
}

#[tokio::test]
async fn composite_update_updates_an_existing_sub_record_in_place() {
    let store = store();
    let api = ScholarshipsApi::new(store.clone());
    let write = api.create(scholarship_with_dependents()).await.unwrap();

    api.update(
        write.scholarship.id,
        ScholarshipPatch {
            title: Some("Open Source Fellowship 2026".into()),
            eligibility: Some(EligibilityFields {
                requirements: Some("Two merged patches".into()),
                ..EligibilityFields::default()
            }),
            ..ScholarshipPatch::default()
        },
    )
    .await
    .unwrap();

    // updated, not inserted
    let eligibility = store.rows(SCHOLARSHIP_ELIGIBILITY).await;
    assert_eq!(eligibility.len(), 1);
    assert_eq!(eligibility[0]["requirements"], "Two merged patches");
    assert!(eligibility[0].get("updated_at").is_some());

    let base = store.rows(SCHOLARSHIPS).await;
    assert_eq!(base[0]["title"], "Open Source Fellowship 2026");
}

#[tokio::test]
async fn composite_update_inserts_a_missing_sub_record() {
    let store = store();
    let api = ScholarshipsApi::new(store.clone());
    let write = api
        .create(NewScholarship {
            title: "Travel Grant".into(),
            ..NewScholarship::default()
        })
        .await
        .unwrap();

    api.update(
        write.scholarship.id,
        ScholarshipPatch {
            benefits: Some(BenefitsFields {
                amount: Some("€300".into()),
                ..BenefitsFields::default()
            }),
            ..ScholarshipPatch::default()
        },
    )
    .await
    .unwrap();

    let benefits = store.rows(SCHOLARSHIP_BENEFITS).await;
    assert_eq!(benefits.len(), 1);
    assert_eq!(
        benefits[0]["scholarship_id"],
        json!(write.scholarship.id.to_string())
    );
}

#[tokio::test]
async fn scholarship_list_embeds_sub_records() {
    let store = store();
    let api = ScholarshipsApi::new(store.clone());
    api.create(scholarship_with_dependents()).await.unwrap();

    // the in-memory store has no embed support; graft the rows the way the
    // remote view would return them
    let mut base = store.rows(SCHOLARSHIPS).await.remove(0);
    base["scholarship_eligibility"] = json!(store.rows(SCHOLARSHIP_ELIGIBILITY).await);
    base["scholarship_benefits"] = json!(store.rows(SCHOLARSHIP_BENEFITS).await);
    store.seed(SCHOLARSHIPS, vec![base]).await;

    let scholarships = api.list().await.unwrap();
    assert_eq!(scholarships.len(), 1);
    assert!(scholarships[0].eligibility.is_some());
    assert!(scholarships[0].benefits.is_some());
}

#[tokio::test]
async fn partner_events_prefer_the_primary_collection() {
    let store = store();
    let api = PartnerEventsApi::new(store.clone());

    api.create(NewPartnerEvent {
        name: "Partner demo day".into(),
        date: Some("June 14th, afternoon".into()),
        ..NewPartnerEvent::default()
    })
    .await
    .unwrap();

    assert_eq!(store.rows(PARTNER_EVENTS).await.len(), 1);
    assert!(store.rows(PARTNER_EVENTS_LEGACY).await.is_empty());
}

#[tokio::test]
async fn partner_events_fall_back_on_any_primary_failure() {
    let store = store();
    store.fail_collection(PARTNER_EVENTS).await;
    let api = PartnerEventsApi::new(store.clone());

    let created = api
        .create(NewPartnerEvent {
            name: "Partner demo day".into(),
            ..NewPartnerEvent::default()
        })
        .await
        .unwrap();
    assert_eq!(store.rows(PARTNER_EVENTS_LEGACY).await.len(), 1);

    let listed = api.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn event_flag_toggles_patch_a_single_field() {
    let store = store();
    let api = EventsApi::new(store.clone());

    let event = api
        .create(NewEvent {
            name: "Rust workshop".into(),
            location: Some("Lab 2".into()),
            ..NewEvent::default()
        })
        .await
        .unwrap();
    assert!(!event.highlighted);

    let highlighted = api.set_highlighted(event.id, true).await.unwrap();
    assert!(highlighted.highlighted);

    let posted = api
        .set_posted(event.id, PromoChannel::WhatsApp, true)
        .await
        .unwrap();
    assert!(posted.whatsapp_posted);
    // the earlier toggle survives the second patch
    assert!(posted.highlighted);
    assert_eq!(posted.location.as_deref(), Some("Lab 2"));
}

#[tokio::test]
async fn dashboard_counts_degrade_to_zero_on_failure() {
    let store = store();
    store
        .create(SIGNUPS, json!({ "name": "Ada", "email": "ada@example.org" }))
        .await
        .unwrap();
    store
        .create(SIGNUPS, json!({ "name": "Grace", "email": "grace@example.org" }))
        .await
        .unwrap();
    store.fail_collection(EVENTS).await;

    let stats = DashboardStats::new(store.clone());
    assert_eq!(stats.signups_count().await, 2);
    assert_eq!(stats.events_count().await, 0);
}

#[tokio::test]
async fn item_name_lookups_cover_title_collections_and_degrade_to_empty() {
    let store = store();
    let events = EventsApi::new(store.clone());
    let created = events
        .create(NewEvent {
            name: "Rust workshop".into(),
            ..NewEvent::default()
        })
        .await
        .unwrap();
    let scholarships = ScholarshipsApi::new(store.clone());
    scholarships
        .create(NewScholarship {
            title: "Travel Grant".into(),
            ..NewScholarship::default()
        })
        .await
        .unwrap();

    let names = ItemNamesApi::new(store.clone());
    let event_names = names.event_names().await;
    assert_eq!(event_names.len(), 1);
    assert_eq!(event_names[0].id, created.id.to_string());
    assert_eq!(event_names[0].name, "Rust workshop");

    let scholarship_names = names.scholarship_names().await;
    assert_eq!(scholarship_names.len(), 1);
    assert_eq!(scholarship_names[0].name, "Travel Grant");

    store.fail_collection(EVENTS).await;
    assert!(names.event_names().await.is_empty());
}
