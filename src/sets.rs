/// Known sets and their card counts, used when discovery is off or fails.
pub const DEFAULT_CARD_SETS: &[(&str, u32)] = &[
    ("SOR", 252), // Spark of Rebellion
    ("TWI", 257), // Twilight of the Republic
    ("SHD", 262), // Shadows of the Galaxy
    ("LOF", 264), // Legends of the Force
    ("JTL", 262), // Jump To Lightspeed
    ("SEC", 264), // Secrets of Power
];

/// Ordered mapping from set code to expected card count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetTable {
    entries: Vec<(String, u32)>,
}

impl SetTable {
    pub fn new() -> Self {
        SetTable::default()
    }

    pub fn fallback() -> Self {
        DEFAULT_CARD_SETS
            .iter()
            .map(|(code, count)| (code.to_string(), *count))
            .collect()
    }

    pub fn insert(&mut self, code: &str, count: u32) {
        match self.entries.iter_mut().find(|(c, _)| c == code) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((code.to_string(), count)),
        }
    }

    /// Overlays `discovered` on this table: counts of known codes are replaced,
    /// new codes are appended in discovery order.
    pub fn merge<I>(mut self, discovered: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        for (code, count) in discovered {
            self.insert(&code, count);
        }
        self
    }

    pub fn get(&self, code: &str) -> Option<u32> {
        self.entries.iter().find(|(c, _)| c == code).map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cards(&self) -> u64 {
        self.entries.iter().map(|(_, n)| u64::from(*n)).sum()
    }
}

impl FromIterator<(String, u32)> for SetTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        SetTable::new().merge(iter)
    }
}
