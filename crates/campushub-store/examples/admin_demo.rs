//! Admin Demo Example - Typed collection APIs over the in-memory store
//!
//! Walks the dashboard's main flows against the in-memory record store:
//! event flag toggles, the scholarship composite write, the partner events
//! collection-name fallback, and the landing page counts. Swap the store for
//! `RestClient::new(StoreConfig::from_env()?, sessions)` to run the same
//! calls against a hosted backend.
//!
//! Run with: cargo run -p campushub-store --example admin_demo

use std::sync::Arc;

use campushub_core::scholarship::{BenefitsFields, EligibilityFields};
use campushub_core::{
    InMemoryRecordStore, NewEvent, NewPartnerEvent, NewScholarship, PromoChannel,
    ScholarshipPatch,
};
use campushub_store::collections::PARTNER_EVENTS;
use campushub_store::{DashboardStats, EventsApi, PartnerEventsApi, ScholarshipsApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("campushub_store=debug")
        .init();

    println!("=== Admin Demo (campushub-store) ===\n");

    let store = Arc::new(InMemoryRecordStore::new());

    // 1. Events: create, then the independent flag toggles
    let events = EventsApi::new(store.clone());
    let workshop = events
        .create(NewEvent {
            name: "Rust workshop".to_string(),
            location: Some("Campus Lab 2".to_string()),
            ..NewEvent::default()
        })
        .await?;
    events.set_highlighted(workshop.id, true).await?;
    let workshop = events
        .set_posted(workshop.id, PromoChannel::WhatsApp, true)
        .await?;
    println!(
        "Event \"{}\": highlighted={}, whatsapp_posted={}",
        workshop.name, workshop.highlighted, workshop.whatsapp_posted
    );

    // 2. Scholarships: base record plus both dependent sub-records
    let scholarships = ScholarshipsApi::new(store.clone());
    let write = scholarships
        .create(NewScholarship {
            title: "Open Source Fellowship".to_string(),
            provider: Some("RustBridge".to_string()),
            eligibility: Some(EligibilityFields {
                requirements: Some("Active contributor".to_string()),
                ..EligibilityFields::default()
            }),
            benefits: Some(BenefitsFields {
                amount: Some("€5,000".to_string()),
                ..BenefitsFields::default()
            }),
            ..NewScholarship::default()
        })
        .await?;
    println!(
        "Scholarship \"{}\" stored, fully consistent: {}",
        write.scholarship.title,
        write.is_consistent()
    );

    // 3. Updating probes for the existing sub-record and patches it in place
    scholarships
        .update(
            write.scholarship.id,
            ScholarshipPatch {
                eligibility: Some(EligibilityFields {
                    requirements: Some("Two merged patches".to_string()),
                    ..EligibilityFields::default()
                }),
                ..ScholarshipPatch::default()
            },
        )
        .await?;

    // 4. Partner events fall back to the legacy spaced name when the
    //    primary collection fails
    store.fail_collection(PARTNER_EVENTS).await;
    let partners = PartnerEventsApi::new(store.clone());
    let demo_day = partners
        .create(NewPartnerEvent {
            name: "Partner demo day".to_string(),
            date: Some("June 14th, afternoon".to_string()),
            ..NewPartnerEvent::default()
        })
        .await?;
    println!("Partner event \"{}\" stored under the legacy name", demo_day.name);

    // 5. Landing page counts never fail the page
    let stats = DashboardStats::new(store.clone());
    println!(
        "\nCounts: {} events, {} hackathons, {} scholarships, {} signups",
        stats.events_count().await,
        stats.hackathons_count().await,
        stats.scholarships_count().await,
        stats.signups_count().await,
    );

    Ok(())
}
