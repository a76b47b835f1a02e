// Click aggregation for the link-tracking view
//
// Pure transforms over the two derived click views. Totals and groups are
// accumulated into ordered maps before the stable descending sort, so ties
// break lexically and the output is deterministic for equal counts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::clicks::{Category, ItemClicks, PlatformClicks};

/// Click total for one platform across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformTotal {
    pub platform: String,
    pub clicks: u64,
}

/// Click total for one category across all platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub clicks: u64,
}

/// Per-item click summary with a per-platform breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemClickSummary {
    pub category: Category,
    pub item_id: String,
    /// First destination seen for the item; all rows of one item share it.
    pub destination_url: String,
    pub platforms: BTreeMap<String, u64>,
    pub total: u64,
}

impl ItemClickSummary {
    /// Clicks from one platform, zero when the platform never hit this item.
    pub fn platform_clicks(&self, platform: &str) -> u64 {
        self.platforms.get(platform).copied().unwrap_or(0)
    }
}

/// Independent post-aggregation filters for the per-item breakdown.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Keep only items of this category.
    pub category: Option<Category>,
    /// Keep only items with at least one click from this platform.
    pub platform: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &ItemClickSummary) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if item.platform_clicks(platform) == 0 {
                return false;
            }
        }
        true
    }
}

/// Sum clicks per platform across all categories, busiest platform first.
pub fn platform_totals(rows: &[PlatformClicks]) -> Vec<PlatformTotal> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.platform.as_str()).or_default() += row.clicks;
    }
    let mut out: Vec<PlatformTotal> = totals
        .into_iter()
        .map(|(platform, clicks)| PlatformTotal {
            platform: platform.to_string(),
            clicks,
        })
        .collect();
    out.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    out
}

/// Sum clicks per category across all platforms, busiest category first.
pub fn category_totals(rows: &[PlatformClicks]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<Category, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.category).or_default() += row.clicks;
    }
    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, clicks)| CategoryTotal { category, clicks })
        .collect();
    out.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    out
}

/// Group item-level rows by (category, item), accumulating a per-platform
/// count map and a running total per group, most-clicked group first.
pub fn group_by_item(rows: &[ItemClicks]) -> Vec<ItemClickSummary> {
    let mut groups: BTreeMap<(Category, &str), ItemClickSummary> = BTreeMap::new();
    for row in rows {
        let entry = groups
            .entry((row.category, row.item_id.as_str()))
            .or_insert_with(|| ItemClickSummary {
                category: row.category,
                item_id: row.item_id.clone(),
                destination_url: row.destination_url.clone(),
                platforms: BTreeMap::new(),
                total: 0,
            });
        *entry.platforms.entry(row.platform.clone()).or_default() += row.clicks;
        entry.total += row.clicks;
    }
    let mut out: Vec<ItemClickSummary> = groups.into_values().collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

/// Apply the breakdown filters to already-grouped items.
pub fn filter_items(items: Vec<ItemClickSummary>, filter: &ItemFilter) -> Vec<ItemClickSummary> {
    items
        .into_iter()
        .filter(|item| filter.matches(item))
        .collect()
}

/// Distinct platforms observed in the item rows, sorted lexically. Drives
/// one dynamic column per platform, so platforms the label config does not
/// know yet still get a column.
pub fn platform_universe(rows: &[ItemClicks]) -> Vec<String> {
    let set: BTreeSet<&str> = rows.iter().map(|row| row.platform.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Share of total clicks, rounded to whole percent. `None` when there are no
/// clicks at all, so callers never render a percentage computed from zero.
pub fn percent_of_total(clicks: u64, total: u64) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((clicks as f64 / total as f64 * 100.0).round() as u32)
}

/// Display label for a platform tag. Unknown tags display as themselves so
/// new platforms show up before anyone styles them.
pub fn platform_label(platform: &str) -> &str {
    match platform {
        "whatsapp" => "WhatsApp",
        "linkedin" => "LinkedIn",
        "newsletter" => "Newsletter",
        "telegram" => "Telegram",
        other => other,
    }
}
