// CampusHub admin dashboard core
//
// Domain types and pure view logic for the admin dashboard: one structured
// type per remote collection, the error taxonomy every store operation
// classifies into, the boundary traits for the hosted record store, and the
// derived projections (click aggregation, event list views) the UI renders.
//
// Key design decisions:
// - Entities are explicit structs validated by serde at the gateway boundary
//   rather than dynamic maps trusted from the remote
// - Store access goes through the RecordStore trait so tests substitute the
//   in-memory implementation for the HTTP gateway
// - The aggregation and list-projection layers are pure functions: no I/O,
//   no domain errors, graceful degradation on absent fields

pub mod analytics;
pub mod clicks;
pub mod error;
pub mod event;
pub mod inflight;
pub mod memory;
pub mod partner_event;
pub mod schedule;
pub mod scholarship;
pub mod session;
pub mod signup;
pub mod traits;

// Re-exports for convenience
pub use clicks::{Category, ItemClicks, PlatformClicks};
pub use error::{Result, StoreError};
pub use event::{Event, EventPatch, NewEvent, PromoChannel};
pub use inflight::{InFlightGuard, InFlightToken};
pub use memory::{InMemoryRecordStore, StaticSessionProvider};
pub use partner_event::{NewPartnerEvent, PartnerEvent, PartnerEventPatch};
pub use scholarship::{
    BenefitsFields, EligibilityFields, NewScholarship, Scholarship, ScholarshipBenefits,
    ScholarshipEligibility, ScholarshipPatch,
};
pub use session::{Role, Session};
pub use signup::Signup;
pub use traits::{ListQuery, RecordStore, SessionProvider};

// Aggregation and projection re-exports
pub use analytics::{
    category_totals, filter_items, group_by_item, percent_of_total, platform_label,
    platform_totals, platform_universe, CategoryTotal, ItemClickSummary, ItemFilter,
    PlatformTotal,
};
pub use schedule::{
    compare_events, day_label, event_list, event_timeline, filter_events, sort_events,
    weekday_label, DayGroup, EventFilter, SortDirection,
};
