use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One card as returned by the upstream API. Fields are kept verbatim and in
/// upstream order; the accessors below only read.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Card(Map<String, Value>);

impl Card {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field. Non-string scalars are not coerced.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// String elements of a list-valued field, empty when missing.
    pub fn list(&self, field: &str) -> Vec<&str> {
        match self.0.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Falsiness the way the card printer treats it: missing, null, false, zero,
    /// empty strings and empty collections are all "not present".
    pub fn is_truthy(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.text("Name")
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.text("Subtitle")
    }

    pub fn set(&self) -> Option<&str> {
        self.text("Set")
    }

    pub fn number(&self) -> Option<&str> {
        self.text("Number")
    }

    pub fn card_type(&self) -> Option<&str> {
        self.text("Type")
    }

    pub fn rarity(&self) -> Option<&str> {
        self.text("Rarity")
    }

    pub fn aspects(&self) -> Vec<&str> {
        self.list("Aspects")
    }

    pub fn traits(&self) -> Vec<&str> {
        self.list("Traits")
    }

    pub fn arenas(&self) -> Vec<&str> {
        self.list("Arenas")
    }

    pub fn keywords(&self) -> Vec<&str> {
        self.list("Keywords")
    }

    /// Cost as an integer. A card without a Cost field counts as 0; null and
    /// placeholders such as "-" or "X" yield `None`.
    pub fn numeric_cost(&self) -> Option<i64> {
        match self.0.get("Cost") {
            None => Some(0),
            Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(Value::Bool(b)) => Some(i64::from(*b)),
            Some(_) => None,
        }
    }

    /// `(Set, Number)` identity of the card, when both are present.
    pub fn key(&self) -> Option<(&str, &str)> {
        Some((self.set()?, self.number()?))
    }

    /// Display value of a scalar field: strings verbatim, other values as JSON text.
    pub fn display(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
