//! Link Tracking Example - Aggregating click facts in memory
//!
//! Feeds the aggregation engine the same row shapes the two remote click
//! views return and prints the dashboard's three summaries: totals by
//! platform, totals by category, and the per-item breakdown with its
//! dynamic platform columns.
//!
//! Run with: cargo run -p campushub-core --example link_tracking

use campushub_core::{
    category_totals, filter_items, group_by_item, percent_of_total, platform_label,
    platform_totals, platform_universe, Category, ItemClicks, ItemFilter, PlatformClicks,
};

fn platform_row(platform: &str, category: Category, clicks: u64) -> PlatformClicks {
    PlatformClicks {
        platform: platform.to_string(),
        category,
        clicks,
    }
}

fn item_row(category: Category, item_id: &str, platform: &str, clicks: u64) -> ItemClicks {
    ItemClicks {
        category,
        item_id: item_id.to_string(),
        platform: platform.to_string(),
        destination_url: format!("https://campushub.example/{category}/{item_id}"),
        clicks,
    }
}

fn main() {
    println!("=== Link Tracking (campushub-core) ===\n");

    // 1. Rows as the clicks-by-platform view returns them
    let by_platform = vec![
        platform_row("whatsapp", Category::Event, 34),
        platform_row("whatsapp", Category::Hackathon, 12),
        platform_row("linkedin", Category::Event, 28),
        platform_row("linkedin", Category::Scholarship, 9),
        platform_row("newsletter", Category::Scholarship, 17),
    ];
    let total: u64 = by_platform.iter().map(|row| row.clicks).sum();

    // 2. Platform cards with their share of the total
    println!("Platforms ({total} clicks total):");
    for entry in platform_totals(&by_platform) {
        match percent_of_total(entry.clicks, total) {
            Some(percent) => println!(
                "  {:<12} {:>4} clicks  {percent}%",
                platform_label(&entry.platform),
                entry.clicks
            ),
            None => println!(
                "  {:<12} {:>4} clicks",
                platform_label(&entry.platform),
                entry.clicks
            ),
        }
    }

    // 3. Category cards
    println!("\nCategories:");
    for entry in category_totals(&by_platform) {
        println!("  {:<12} {:>4} clicks", entry.category.plural_label(), entry.clicks);
    }

    // 4. Rows as the clicks-by-item view returns them
    let by_item = vec![
        item_row(Category::Event, "rust-workshop", "whatsapp", 21),
        item_row(Category::Event, "rust-workshop", "linkedin", 13),
        item_row(Category::Hackathon, "spring-hack", "whatsapp", 12),
        item_row(Category::Scholarship, "travel-grant", "newsletter", 17),
        item_row(Category::Scholarship, "travel-grant", "linkedin", 9),
    ];

    // 5. One dynamic column per observed platform
    let columns = platform_universe(&by_item);
    println!("\nBreakdown columns: {columns:?}");

    // 6. Grouped breakdown, busiest item first
    println!("\nAll items:");
    for item in group_by_item(&by_item) {
        println!(
            "  [{}] {:<14} total {:>3}  {:?}",
            item.category.label(),
            item.item_id,
            item.total,
            item.platforms
        );
    }

    // 7. The same breakdown restricted to one platform
    let filter = ItemFilter {
        category: None,
        platform: Some("linkedin".to_string()),
    };
    println!("\nItems with LinkedIn clicks:");
    for item in filter_items(group_by_item(&by_item), &filter) {
        println!(
            "  [{}] {:<14} linkedin {:>3} of {}",
            item.category.label(),
            item.item_id,
            item.platform_clicks("linkedin"),
            item.total
        );
    }
}
