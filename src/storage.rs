use crate::card::Card;
use crate::config::Settings;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const UNKNOWN_SET: &str = "UNKNOWN";

/// Files written by [`save_database`].
#[derive(Debug, Default)]
pub struct SavedFiles {
    pub json: PathBuf,
    pub csv: Option<PathBuf>,
    /// Per-set files in first-seen order, with their card counts.
    pub by_set: Vec<(String, PathBuf, usize)>,
}

fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn file_size_kb(path: &Path) -> f64 {
    fs::metadata(path).map(|m| m.len() as f64 / 1024.0).unwrap_or(0.0)
}

/// CSV cell for a card value: lists and mappings become JSON text.
pub fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Writes the flat CSV form of `cards`. Columns are the sorted union of all
/// field names; fields a card lacks are left empty.
pub fn write_cards_csv<W: Write>(writer: W, cards: &[Card]) -> Result<()> {
    let columns: BTreeSet<&str> = cards
        .iter()
        .flat_map(|card| card.fields().keys().map(String::as_str))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;
    for card in cards {
        let row = columns
            .iter()
            .map(|column| card.get(column).map(csv_cell).unwrap_or_default());
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Groups cards by `Set`, keeping first-seen set order and card order within a set.
pub fn group_by_set(cards: &[Card]) -> Vec<(String, Vec<&Card>)> {
    let mut groups: Vec<(String, Vec<&Card>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for card in cards {
        let set_code = card.set().unwrap_or(UNKNOWN_SET).to_string();
        let slot = *index.entry(set_code.clone()).or_insert_with(|| {
            groups.push((set_code, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(card);
    }

    groups
}

/// File stem for a set's JSON file. Anything but ASCII letters, digits, `-`
/// and `_` becomes `_`, so a set code can never leave the per-set folder.
pub fn set_file_stem(set_code: &str) -> String {
    let stem: String = set_code
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        UNKNOWN_SET.to_string()
    } else {
        stem
    }
}

/// Writes the flat JSON array, the CSV and one JSON file per set.
pub fn save_database(cards: &[Card], settings: &Settings) -> Result<SavedFiles> {
    fs::create_dir_all(&settings.database_dir)?;
    let mut saved = SavedFiles::default();

    let json_path = settings.cards_json_path();
    write_pretty_json(&json_path, cards)?;
    info!("Saved JSON database: {}", json_path.display());
    saved.json = json_path;

    if !cards.is_empty() {
        let csv_path = settings.cards_csv_path();
        let file = File::create(&csv_path)?;
        write_cards_csv(BufWriter::new(file), cards)?;
        info!("Saved CSV database: {}", csv_path.display());
        saved.csv = Some(csv_path);
    }

    let by_set_dir = settings.by_set_dir();
    fs::create_dir_all(&by_set_dir)?;
    for (set_code, set_cards) in group_by_set(cards) {
        let set_path = by_set_dir.join(format!("{}.json", set_file_stem(&set_code)));
        write_pretty_json(&set_path, &set_cards)?;
        saved.by_set.push((set_code, set_path, set_cards.len()));
    }

    Ok(saved)
}

pub fn load_cards_json(path: &Path) -> Result<Vec<Card>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let cards: Vec<Card> = serde_json::from_reader(reader)?;
    Ok(cards)
}

/// Reads a CSV with a header row into one column-name → cell map per row.
pub fn load_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
