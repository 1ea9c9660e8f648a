use crate::api::SwuClient;
use crate::config::Settings;
use crate::sets::SetTable;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{info, warn};

pub const MIN_SET_SIZE: u32 = 50;
pub const MAX_SET_SIZE: u32 = 1000;

lazy_static! {
    static ref SET_CODE: Regex = Regex::new(r"^[A-Z0-9]{2,4}$").unwrap();
    static ref CARD_COUNT: Regex = Regex::new(r"^(\d+|\d{1,3}(,\d{3})+)$").unwrap();
    static ref ROW: Selector = Selector::parse("table tr").unwrap();
    static ref CELL: Selector = Selector::parse("td, th").unwrap();
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn is_set_code(text: &str) -> bool {
    SET_CODE.is_match(text) && text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Plain digits, or digits grouped by thousands with commas. Decimals are
/// rejected rather than read as one long number.
fn parse_card_count(text: &str) -> Option<u32> {
    if !CARD_COUNT.is_match(text) {
        return None;
    }
    let count: u32 = text.replace(',', "").parse().ok()?;
    (MIN_SET_SIZE..=MAX_SET_SIZE).contains(&count).then_some(count)
}

/// Extracts `(set code, card count)` pairs from the tables of a listing page.
/// A row counts when one cell holds a plausible set code and a later cell holds
/// a plausible card count.
pub fn parse_set_table(html: &str) -> Vec<(String, u32)> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut sets = Vec::new();

    for row in document.select(&ROW) {
        let cells: Vec<String> = row.select(&CELL).map(cell_text).collect();

        let Some(code_idx) = cells.iter().position(|c| is_set_code(c)) else {
            continue;
        };
        let Some(count) = cells[code_idx + 1..].iter().find_map(|c| parse_card_count(c)) else {
            continue;
        };

        let code = cells[code_idx].clone();
        if seen.insert(code.clone()) {
            sets.push((code, count));
        }
    }

    sets
}

/// Builds the set table for a fetch run: the hardcoded table overlaid with
/// whatever the listing page yields. Any discovery failure leaves the
/// hardcoded table as is.
pub async fn discover_sets(client: &SwuClient, settings: &Settings) -> SetTable {
    let fallback = SetTable::fallback();

    let Some(url) = settings.sets_page_url.as_deref() else {
        warn!("SWU_SETS_PAGE_URL is not set, using the built-in set table");
        return fallback;
    };

    let html = match client.fetch_page(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(%url, error = %e, "could not fetch set listing, using the built-in set table");
            return fallback;
        }
    };

    let discovered = parse_set_table(&html);
    if discovered.is_empty() {
        warn!(%url, "no sets found on listing page, using the built-in set table");
        return fallback;
    }

    info!(count = discovered.len(), "discovered sets on listing page");
    fallback.merge(discovered)
}
