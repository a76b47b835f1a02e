// Hosted record store gateway
//
// This crate connects the domain core to the hosted PostgREST backend:
// - RestClient: the HTTP gateway implementing RecordStore, classifying
//   remote failures into the StoreError taxonomy
// - Typed per-collection facades, constructed with an injected store handle
// - The composite write coordinator keeping scholarships and their dependent
//   sub-records consistent under create and update

pub mod client;
pub mod collections;
pub mod config;
pub mod scholarships;

// Re-exports for convenience
pub use client::RestClient;
pub use collections::{
    DashboardStats, EventsApi, ItemName, ItemNamesApi, LinkTrackingApi, PartnerEventsApi,
    SignupsApi,
};
pub use config::StoreConfig;
pub use scholarships::{DependentFailure, ScholarshipWrite, ScholarshipsApi};
