use crate::card::Card;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UNKNOWN: &str = "UNKNOWN";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Statistics {
    pub total_cards: usize,
    pub by_set: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub by_rarity: BTreeMap<String, usize>,
    pub by_aspect: BTreeMap<String, usize>,
    pub by_arena: BTreeMap<String, usize>,
}

fn tally(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

impl Statistics {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut stats = Statistics {
            total_cards: cards.len(),
            ..Statistics::default()
        };

        for card in cards {
            tally(&mut stats.by_set, card.set().unwrap_or(UNKNOWN));
            tally(&mut stats.by_type, card.card_type().unwrap_or(UNKNOWN));
            tally(&mut stats.by_rarity, card.rarity().unwrap_or(UNKNOWN));
            for aspect in card.aspects() {
                tally(&mut stats.by_aspect, aspect);
            }
            for arena in card.arenas() {
                if !arena.is_empty() {
                    tally(&mut stats.by_arena, arena);
                }
            }
        }

        stats
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: &BTreeMap<String, usize>,
) -> fmt::Result {
    writeln!(f, "\nCards by {}:", title)?;
    for (key, count) in counts {
        writeln!(f, "  {}: {}", key, count)?;
    }
    Ok(())
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Cards: {}", self.total_cards)?;
        write_section(f, "Set", &self.by_set)?;
        write_section(f, "Type", &self.by_type)?;
        write_section(f, "Rarity", &self.by_rarity)?;
        write_section(f, "Aspect", &self.by_aspect)?;
        write_section(f, "Arena", &self.by_arena)
    }
}
