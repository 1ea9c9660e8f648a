use crate::card::Card;
use crate::error::Result;
use crate::storage::load_cards_json;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

const RULE: &str = "============================================================";

/// In-memory card list loaded once. Every query is a fresh linear scan that
/// keeps source order and never mutates the list.
pub struct CardDatabase {
    cards: Vec<Card>,
}

impl CardDatabase {
    pub fn load(path: &Path) -> Result<Self> {
        let cards = load_cards_json(path)?;
        info!("Loaded {} cards from database", cards.len());
        Ok(CardDatabase { cards })
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        CardDatabase { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(|&card| predicate(card)).collect()
    }

    /// Looks up one card. The set code is upper-cased and the number
    /// zero-padded to three digits, so `("sor", "10")` finds `SOR` `010`.
    pub fn get_card(&self, set_code: &str, number: &str) -> Option<&Card> {
        let set_code = set_code.trim().to_uppercase();
        let number = format!("{:0>3}", number.trim());
        self.cards
            .iter()
            .find(|card| card.set() == Some(set_code.as_str()) && card.number() == Some(number.as_str()))
    }

    /// Case-insensitive substring match against Name or Subtitle.
    pub fn search_by_name(&self, name: &str) -> Vec<&Card> {
        let needle = name.to_lowercase();
        self.filter(|card| {
            card.name().unwrap_or("").to_lowercase().contains(&needle)
                || card.subtitle().unwrap_or("").to_lowercase().contains(&needle)
        })
    }

    /// Set codes are stored upper-case, so the query is upper-cased before
    /// the exact comparison.
    pub fn filter_by_set(&self, set_code: &str) -> Vec<&Card> {
        let set_code = set_code.trim().to_uppercase();
        self.filter(|card| card.set() == Some(set_code.as_str()))
    }

    pub fn filter_by_type(&self, card_type: &str) -> Vec<&Card> {
        self.filter(|card| card.card_type() == Some(card_type))
    }

    pub fn filter_by_rarity(&self, rarity: &str) -> Vec<&Card> {
        self.filter(|card| card.rarity() == Some(rarity))
    }

    /// Traits are compared case-insensitively, as whole trait names.
    pub fn filter_by_trait(&self, trait_name: &str) -> Vec<&Card> {
        let wanted = trait_name.to_uppercase();
        self.filter(|card| card.traits().iter().any(|t| t.to_uppercase() == wanted))
    }

    pub fn filter_by_aspect(&self, aspect: &str) -> Vec<&Card> {
        self.filter(|card| card.aspects().contains(&aspect))
    }

    /// Cards whose Cost lies in `min_cost..=max_cost`. Cards with a
    /// non-numeric Cost are left out.
    pub fn filter_by_cost(&self, min_cost: i64, max_cost: i64) -> Vec<&Card> {
        self.filter(|card| {
            card.numeric_cost()
                .map_or(false, |cost| (min_cost..=max_cost).contains(&cost))
        })
    }

    pub fn get_legendaries(&self) -> Vec<&Card> {
        self.filter_by_rarity("Legendary")
    }

    pub fn get_leaders(&self) -> Vec<&Card> {
        self.filter_by_type("Leader")
    }
}

fn joined(card: &Card, field: &str) -> Option<String> {
    if !card.is_truthy(field) {
        return None;
    }
    Some(card.list(field).join(", "))
}

/// Terminal rendering of a card. Fields that are missing or empty are left out.
pub fn format_card(card: &Card) -> String {
    let mut out = String::new();
    let name = card.name().unwrap_or("Unknown");

    let _ = writeln!(out, "{}", RULE);
    match card.subtitle().filter(|s| !s.is_empty()) {
        Some(subtitle) => {
            let _ = writeln!(out, "{} - {}", name, subtitle);
        }
        None => {
            let _ = writeln!(out, "{}", name);
        }
    }
    let _ = writeln!(out, "{}", RULE);

    if card.is_truthy("Set") || card.is_truthy("Number") {
        let _ = writeln!(
            out,
            "Set: {} #{}",
            card.display("Set").unwrap_or_default(),
            card.display("Number").unwrap_or_default()
        );
    }
    if card.is_truthy("Type") {
        let _ = writeln!(out, "Type: {}", card.display("Type").unwrap_or_default());
    }

    if let Some(aspects) = joined(card, "Aspects") {
        let _ = writeln!(out, "Aspects: {}", aspects);
    }
    if let Some(traits) = joined(card, "Traits") {
        let _ = writeln!(out, "Traits: {}", traits);
    }
    if let Some(arenas) = joined(card, "Arenas") {
        let _ = writeln!(out, "Arena: {}", arenas);
    }

    if card.is_truthy("Cost") {
        let mut stats = format!("Cost: {}", card.display("Cost").unwrap_or_default());
        if card.is_truthy("Power") {
            let _ = write!(stats, " | Power: {}", card.display("Power").unwrap_or_default());
        }
        if card.is_truthy("HP") {
            let _ = write!(stats, " | HP: {}", card.display("HP").unwrap_or_default());
        }
        let _ = writeln!(out, "{}", stats);
    }

    if card.is_truthy("Rarity") {
        let _ = writeln!(out, "Rarity: {}", card.display("Rarity").unwrap_or_default());
    }

    if card.is_truthy("FrontText") {
        let _ = writeln!(out, "\nText: {}", card.display("FrontText").unwrap_or_default());
    }
    if card.is_truthy("EpicAction") {
        let _ = writeln!(out, "\nEpic Action: {}", card.display("EpicAction").unwrap_or_default());
    }
    if card.is_truthy("BackText") && card.is_truthy("DoubleSided") {
        let _ = writeln!(out, "\nBack Text: {}", card.display("BackText").unwrap_or_default());
    }
    let keywords = card.keywords();
    if !keywords.is_empty() {
        let _ = writeln!(out, "\nKeywords: {}", keywords.join(", "));
    }

    if card.is_truthy("Artist") {
        let _ = writeln!(out, "\nArtist: {}", card.display("Artist").unwrap_or_default());
    }
    if card.is_truthy("MarketPrice") {
        let _ = writeln!(out, "Market Price: ${}", card.display("MarketPrice").unwrap_or_default());
    }
    let _ = writeln!(out, "{}", RULE);

    out
}

pub fn print_card(card: &Card) {
    print!("{}", format_card(card));
}

/// One-line listing used for query results.
pub fn card_line(card: &Card) -> String {
    format!(
        "{} ({} #{})",
        card.name().unwrap_or("Unknown"),
        card.set().unwrap_or("?"),
        card.number().unwrap_or("?")
    )
}
