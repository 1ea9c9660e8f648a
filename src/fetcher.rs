use crate::api::SwuClient;
use crate::card::Card;
use crate::sets::SetTable;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const PROGRESS_EVERY: u64 = 50;

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{msg:>4} [{bar:40}] {pos}/{len} ({percent}%) {eta}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Requests every card number of every set, one at a time, sleeping `delay`
/// after each request. Failed cards and empty `{}` responses are logged and
/// skipped. A response whose `(Set, Number)` was already collected is dropped.
pub async fn build_database(client: &SwuClient, sets: &SetTable, delay: Duration) -> Vec<Card> {
    let total_cards = sets.total_cards();
    let mut all_cards = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut current_card: u64 = 0;

    info!(
        "Starting to fetch {} cards from {} sets...",
        total_cards,
        sets.len()
    );
    let bar = progress_bar(total_cards);

    for (set_code, card_count) in sets.iter() {
        info!("Fetching {} set ({} cards)...", set_code, card_count);
        bar.set_message(set_code.to_string());

        for card_number in 1..=card_count {
            current_card += 1;

            match client.fetch_card(set_code, card_number).await {
                Ok(card) if card.fields().is_empty() => {
                    warn!("Empty response for {}/{}, skipping", set_code, card_number);
                }
                Ok(card) => {
                    let fresh = match card.key() {
                        Some((set, number)) => seen.insert((set.to_string(), number.to_string())),
                        None => true,
                    };
                    if fresh {
                        all_cards.push(card);
                    } else {
                        warn!("Duplicate card returned for {}/{}, skipping", set_code, card_number);
                    }
                }
                Err(e) => warn!("Error fetching {}/{}: {}", set_code, card_number, e),
            }

            bar.inc(1);
            if current_card % PROGRESS_EVERY == 0 {
                info!(
                    "Progress: {}/{} cards requested, {} fetched",
                    current_card,
                    total_cards,
                    all_cards.len()
                );
            }

            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
    }

    bar.finish_and_clear();
    info!(
        "Completed! Successfully fetched {}/{} cards.",
        all_cards.len(),
        total_cards
    );
    all_cards
}
