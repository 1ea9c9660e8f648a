use crate::api::SwuClient;
use crate::config::Settings;
use crate::discovery::discover_sets;
use crate::error::Result;
use crate::fetcher::build_database;
use crate::sets::SetTable;
use crate::stats::Statistics;
use crate::storage::{file_size_kb, save_database};

const RULE: &str = "============================================================";

fn banner(title: &str) {
    println!("\n{}", RULE);
    println!("{}", title);
    println!("{}", RULE);
}

/// Rebuilds the database from the built-in set table, or from the listing
/// page when `discover` is set.
pub async fn update_database(
    client: &SwuClient,
    settings: &Settings,
    discover: bool,
) -> Result<Option<Statistics>> {
    let sets = if discover {
        discover_sets(client, settings).await
    } else {
        SetTable::fallback()
    };
    build_and_save(client, settings, &sets).await
}

/// Fetches every card of `sets`, then writes the database files and statistics.
/// Returns `None`, having written nothing, when no card could be fetched.
pub async fn build_and_save(
    client: &SwuClient,
    settings: &Settings,
    sets: &SetTable,
) -> Result<Option<Statistics>> {
    let cards = build_database(client, sets, settings.request_delay).await;
    if cards.is_empty() {
        println!("\nNo cards were fetched. Please check your internet connection and try again.");
        return Ok(None);
    }

    banner("Saving database...");
    let saved = save_database(&cards, settings)?;
    println!(
        "Saved JSON database: {} ({:.1} KB)",
        saved.json.display(),
        file_size_kb(&saved.json)
    );
    if let Some(csv) = &saved.csv {
        println!("Saved CSV database: {} ({:.1} KB)", csv.display(), file_size_kb(csv));
    }
    for (set_code, _, count) in &saved.by_set {
        println!("Saved {}: {} cards", set_code, count);
    }

    banner("Database Statistics");
    let stats = Statistics::from_cards(&cards);
    println!("\n{}", stats);

    let stats_path = settings.statistics_path();
    stats.save(&stats_path)?;
    println!("Statistics saved to: {}", stats_path.display());

    Ok(Some(stats))
}
