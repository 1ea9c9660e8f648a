//! Twin Suns leader pairing.
//!
//! Leaders are read from the flat CSV, split by alignment (Heroism or Villainy)
//! and every unordered pair inside a group is scored by the number of distinct
//! aspects the two leaders cover, with a small bonus for rare printings.

use crate::error::Result;
use crate::storage::load_csv_rows;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

pub const TOP_PAIRS: usize = 15;
pub const TOP_THREE_ASPECT_PAIRS: usize = 5;

const WIDE_RULE: &str =
    "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

type CsvRow = BTreeMap<String, String>;

/// Decodes the JSON-encoded Aspects cell. Anything unreadable is no aspects.
pub fn parse_aspects(cell: &str) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(cell).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Heroism,
    Villainy,
}

impl Alignment {
    pub fn aspect(self) -> &'static str {
        match self {
            Alignment::Heroism => "Heroism",
            Alignment::Villainy => "Villainy",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.aspect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub name: String,
    pub subtitle: String,
    pub set: String,
    pub aspects: Vec<String>,
    pub rarity: String,
    pub cost: String,
    pub power: String,
    pub hp: String,
}

impl Leader {
    pub fn from_row(row: &CsvRow) -> Self {
        let field = |key: &str, default: &str| {
            row.get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };
        Leader {
            name: field("Name", "Unknown"),
            subtitle: field("Subtitle", ""),
            set: field("Set", ""),
            aspects: row.get("Aspects").map(|a| parse_aspects(a)).unwrap_or_default(),
            rarity: field("Rarity", ""),
            cost: field("Cost", "N/A"),
            power: field("Power", "N/A"),
            hp: field("HP", "N/A"),
        }
    }

    pub fn full_name(&self) -> String {
        if self.subtitle.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.subtitle)
        }
    }

    pub fn has_aspect(&self, aspect: &str) -> bool {
        self.aspects.iter().any(|a| a == aspect)
    }

    /// Special printings are worth 2, Legendary 1, everything else 0.
    pub fn rarity_points(&self) -> u32 {
        match self.rarity.as_str() {
            "Special" => 2,
            "Legendary" => 1,
            _ => 0,
        }
    }
}

/// Leader rows of the CSV, in file order.
pub fn leaders_from_rows(rows: &[CsvRow]) -> Vec<Leader> {
    rows.iter()
        .filter(|row| row.get("Type").map(String::as_str) == Some("Leader"))
        .map(Leader::from_row)
        .collect()
}

/// Members of one alignment group. A leader carrying both tags is in both groups.
pub fn leaders_with(leaders: &[Leader], alignment: Alignment) -> Vec<&Leader> {
    leaders
        .iter()
        .filter(|leader| leader.has_aspect(alignment.aspect()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct LeaderPair<'a> {
    pub first: &'a Leader,
    pub second: &'a Leader,
    /// Sorted union of both leaders' aspects.
    pub aspects: Vec<String>,
    pub combined_aspect_count: usize,
    pub rarity_score: u32,
}

impl<'a> LeaderPair<'a> {
    pub fn new(first: &'a Leader, second: &'a Leader) -> Self {
        let aspects: BTreeSet<&String> = first.aspects.iter().chain(&second.aspects).collect();
        let aspects: Vec<String> = aspects.into_iter().cloned().collect();
        LeaderPair {
            first,
            second,
            combined_aspect_count: aspects.len(),
            aspects,
            rarity_score: first.rarity_points() + second.rarity_points(),
        }
    }

    pub fn sort_key(&self) -> (usize, u32) {
        (self.combined_aspect_count, self.rarity_score)
    }
}

/// Every unordered pair of distinct group members, best first: more aspects
/// wins, rarity breaks ties, and equal pairs keep enumeration order.
pub fn pair_leaders<'a>(group: &[&'a Leader]) -> Vec<LeaderPair<'a>> {
    let mut pairs = Vec::new();
    for (i, &first) in group.iter().enumerate() {
        for &second in &group[i + 1..] {
            pairs.push(LeaderPair::new(first, second));
        }
    }
    pairs.sort_by_key(|pair| Reverse(pair.sort_key()));
    pairs
}

pub fn three_aspect_pairs<'p, 'a>(pairs: &'p [LeaderPair<'a>]) -> Vec<&'p LeaderPair<'a>> {
    pairs
        .iter()
        .filter(|pair| pair.combined_aspect_count == 3)
        .collect()
}

/// Number of leaders per distinct (sorted) aspect set.
pub fn aspect_combinations(leaders: &[Leader]) -> BTreeMap<Vec<String>, usize> {
    let mut combinations = BTreeMap::new();
    for leader in leaders {
        let mut key = leader.aspects.clone();
        key.sort();
        *combinations.entry(key).or_insert(0) += 1;
    }
    combinations
}

pub struct TwinSunsReport {
    pub leaders: Vec<Leader>,
}

impl TwinSunsReport {
    pub fn from_rows(rows: &[CsvRow]) -> Self {
        TwinSunsReport {
            leaders: leaders_from_rows(rows),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let rows = load_csv_rows(path)?;
        Ok(TwinSunsReport::from_rows(&rows))
    }

    pub fn group(&self, alignment: Alignment) -> Vec<&Leader> {
        leaders_with(&self.leaders, alignment)
    }

    pub fn pairs(&self, alignment: Alignment) -> Vec<LeaderPair<'_>> {
        pair_leaders(&self.group(alignment))
    }

    pub fn top_pairs(&self, alignment: Alignment) -> Vec<LeaderPair<'_>> {
        let mut pairs = self.pairs(alignment);
        pairs.truncate(TOP_PAIRS);
        pairs
    }

    fn write_top_pairs(&self, f: &mut fmt::Formatter<'_>, alignment: Alignment) -> fmt::Result {
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(
            f,
            "TOP {} LEADER COMBINATIONS FOR TWIN SUNS",
            alignment.aspect().to_uppercase()
        )?;
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(
            f,
            "\nTop {} {} Combinations (by aspect coverage):\n",
            TOP_PAIRS, alignment
        )?;
        for (idx, pair) in self.top_pairs(alignment).iter().enumerate() {
            let (l1, l2) = (pair.first, pair.second);
            writeln!(
                f,
                "{}. {} ({}) + {} ({})",
                idx + 1,
                l1.full_name(),
                l1.set,
                l2.full_name(),
                l2.set
            )?;
            writeln!(
                f,
                "   Aspects: {} ({} total)",
                pair.aspects.join(" + "),
                pair.combined_aspect_count
            )?;
            writeln!(
                f,
                "   Stats: L1: {}/{}/{} | L2: {}/{}/{}",
                l1.cost, l1.power, l1.hp, l2.cost, l2.power, l2.hp
            )?;
            writeln!(f, "   Rarity: {} + {}", l1.rarity, l2.rarity)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_three_aspect(&self, f: &mut fmt::Formatter<'_>, alignment: Alignment) -> fmt::Result {
        writeln!(
            f,
            "\nBEST 3-ASPECT {} COMBOS:",
            alignment.aspect().to_uppercase()
        )?;
        let pairs = self.pairs(alignment);
        for (idx, pair) in three_aspect_pairs(&pairs)
            .into_iter()
            .take(TOP_THREE_ASPECT_PAIRS)
            .enumerate()
        {
            writeln!(
                f,
                "\n{}. {} + {}",
                idx + 1,
                pair.first.full_name(),
                pair.second.full_name()
            )?;
            writeln!(f, "   Aspects: {}", pair.aspects.join(" + "))?;
            writeln!(f, "   Sets: {}, {}", pair.first.set, pair.second.set)?;
        }
        Ok(())
    }
}

impl fmt::Display for TwinSunsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(f, "TWIN SUNS LEADER ANALYSIS")?;
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(f, "Total Leaders Found: {}\n", self.leaders.len())?;
        writeln!(f, "Heroism Leaders: {}", self.group(Alignment::Heroism).len())?;
        writeln!(f, "Villainy Leaders: {}", self.group(Alignment::Villainy).len())?;
        writeln!(f, "\n{}", WIDE_RULE)?;

        writeln!(f, "\nASPECT COMBINATIONS AVAILABLE:")?;
        writeln!(f, "{}", THIN_RULE)?;
        for (aspects, count) in aspect_combinations(&self.leaders) {
            if !aspects.is_empty() {
                writeln!(f, "{}: {} leaders", aspects.join(" + "), count)?;
            }
        }
        writeln!(f)?;

        self.write_top_pairs(f, Alignment::Heroism)?;
        self.write_top_pairs(f, Alignment::Villainy)?;

        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(f, "RECOMMENDED TWIN SUNS DECKS")?;
        writeln!(f, "{}", WIDE_RULE)?;
        self.write_three_aspect(f, Alignment::Heroism)?;
        writeln!(f)?;
        self.write_three_aspect(f, Alignment::Villainy)?;

        writeln!(f, "\n{}", WIDE_RULE)?;
        writeln!(f, "Analysis complete!")?;
        write!(f, "{}", WIDE_RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(name: &str, aspects: &[&str], rarity: &str) -> Leader {
        Leader {
            name: name.to_string(),
            subtitle: String::new(),
            set: "SOR".to_string(),
            aspects: aspects.iter().map(|a| a.to_string()).collect(),
            rarity: rarity.to_string(),
            cost: "N/A".to_string(),
            power: "N/A".to_string(),
            hp: "N/A".to_string(),
        }
    }

    #[test]
    fn malformed_aspect_cells_decode_to_nothing() {
        assert_eq!(parse_aspects(r#"["Heroism", "Command"]"#), vec!["Heroism", "Command"]);
        assert!(parse_aspects("").is_empty());
        assert!(parse_aspects("Heroism").is_empty());
        assert!(parse_aspects("[1, 2]").is_empty());
    }

    #[test]
    fn pair_scores_union_and_rarity() {
        let a = leader("A", &["Heroism", "Aggression"], "Legendary");
        let b = leader("B", &["Heroism", "Command"], "Common");
        let pair = LeaderPair::new(&a, &b);
        assert_eq!(pair.combined_aspect_count, 3);
        assert_eq!(pair.rarity_score, 1);
        assert_eq!(pair.aspects, vec!["Aggression", "Command", "Heroism"]);
    }

    #[test]
    fn rarity_points_add_per_member() {
        let a = leader("A", &["Heroism"], "Special");
        let b = leader("B", &["Heroism"], "Special");
        assert_eq!(LeaderPair::new(&a, &b).rarity_score, 4);
        let c = leader("C", &["Heroism"], "Legendary");
        assert_eq!(LeaderPair::new(&a, &c).rarity_score, 3);
    }

    #[test]
    fn aspect_coverage_outranks_rarity() {
        let leaders = vec![
            leader("A", &["Heroism", "Aggression"], "Special"),
            leader("B", &["Heroism", "Command"], "Special"),
            leader("C", &["Heroism", "Vigilance", "Cunning"], "Common"),
            leader("D", &["Heroism"], "Common"),
        ];
        let group: Vec<&Leader> = leaders.iter().collect();
        let pairs = pair_leaders(&group);

        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0].combined_aspect_count, 4);
        assert_eq!(pairs[1].combined_aspect_count, 4);
        assert_eq!(pairs[0].rarity_score, 2);
        for window in pairs.windows(2) {
            assert!(window[0].sort_key() >= window[1].sort_key());
        }
        let first_three = pairs.iter().position(|p| p.combined_aspect_count == 3).unwrap();
        assert!(pairs[..first_three].iter().all(|p| p.combined_aspect_count == 4));
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let leaders = vec![
            leader("A", &["Heroism", "Aggression"], "Common"),
            leader("B", &["Heroism", "Command"], "Common"),
            leader("C", &["Heroism", "Cunning"], "Common"),
        ];
        let group: Vec<&Leader> = leaders.iter().collect();
        let names: Vec<(String, String)> = pair_leaders(&group)
            .iter()
            .map(|p| (p.first.name.clone(), p.second.name.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn leaders_with_both_tags_join_both_groups() {
        let leaders = vec![
            leader("Both", &["Heroism", "Villainy"], "Common"),
            leader("Hero", &["Heroism"], "Common"),
            leader("Villain", &["Villainy"], "Common"),
            leader("Neutral", &["Command"], "Common"),
        ];
        assert_eq!(leaders_with(&leaders, Alignment::Heroism).len(), 2);
        assert_eq!(leaders_with(&leaders, Alignment::Villainy).len(), 2);
    }

    #[test]
    fn three_aspect_filter() {
        let leaders = vec![
            leader("A", &["Heroism", "Aggression"], "Common"),
            leader("B", &["Heroism", "Command"], "Common"),
            leader("C", &["Heroism", "Aggression"], "Common"),
        ];
        let group: Vec<&Leader> = leaders.iter().collect();
        let pairs = pair_leaders(&group);
        let three = three_aspect_pairs(&pairs);
        assert_eq!(three.len(), 2);
        assert!(three.iter().all(|p| p.combined_aspect_count == 3));
    }

    #[test]
    fn no_heroism_leaders_is_an_empty_list() {
        let report = TwinSunsReport {
            leaders: vec![leader("Villain", &["Villainy"], "Common")],
        };
        assert!(report.top_pairs(Alignment::Heroism).is_empty());
        assert!(report.to_string().contains("Heroism Leaders: 0"));
    }

    #[test]
    fn aspect_combinations_sort_each_set() {
        let leaders = vec![
            leader("A", &["Villainy", "Aggression"], "Common"),
            leader("B", &["Aggression", "Villainy"], "Common"),
            leader("C", &[], "Common"),
        ];
        let combos = aspect_combinations(&leaders);
        let key = vec!["Aggression".to_string(), "Villainy".to_string()];
        assert_eq!(combos[&key], 2);
        assert_eq!(combos[&Vec::<String>::new()], 1);
    }
}
