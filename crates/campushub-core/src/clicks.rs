// Click facts for the link-tracking analytics
//
// Clicks are immutable append-only facts recorded by the public site. The
// dashboard never writes them; it reads two derived remote views plus an
// exact total and aggregates in-process.

use serde::{Deserialize, Serialize};

/// Discriminant for tracked items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Event,
    Hackathon,
    Scholarship,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Event => "Event",
            Category::Hackathon => "Hackathon",
            Category::Scholarship => "Scholarship",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            Category::Event => "Events",
            Category::Hackathon => "Hackathons",
            Category::Scholarship => "Scholarships",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Event => write!(f, "event"),
            Category::Hackathon => write!(f, "hackathon"),
            Category::Scholarship => write!(f, "scholarship"),
        }
    }
}

/// One row of the clicks-by-platform view: click count for a
/// (platform, category) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformClicks {
    pub platform: String,
    #[serde(rename = "item_type")]
    pub category: Category,
    pub clicks: u64,
}

/// One row of the clicks-by-item view: click count for a
/// (category, item, platform, destination) tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemClicks {
    #[serde(rename = "item_type")]
    pub category: Category,
    pub item_id: String,
    pub platform: String,
    pub destination_url: String,
    pub clicks: u64,
}
