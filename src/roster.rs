use std::collections::BTreeMap;

use crate::model::OrderingRow;

/// A deterministic, complete ordering of all observed teachers paired with
/// their baseline required-hours values.
///
/// The ordered list is always a permutation of the teacher universe: order
/// rows naming unknown teachers are ignored, and universe members missing
/// from the order source are appended after it.
#[derive(Debug, Default)]
pub struct TeacherRoster {
    ordered: Vec<String>,
    base_hours: BTreeMap<String, i32>,
}

impl TeacherRoster {
    /// Builds the roster from the teacher universe (in first-seen assignment
    /// order) and an optional ordering/workload table.
    ///
    /// With order rows: each row's name is appended if it belongs to the
    /// universe, first occurrence wins, and the hours field is parsed
    /// leniently (anything unparseable counts as 0). Universe members not
    /// named by any order row follow in first-seen order with base 0.
    ///
    /// Without order rows: the lexicographic sort of the universe, all 0.
    pub fn build(universe: &[String], order_rows: Option<&[OrderingRow]>) -> Self {
        match order_rows {
            Some(rows) => Self::from_order_rows(universe, rows),
            None => {
                let mut ordered = universe.to_vec();
                ordered.sort();
                let base_hours = ordered.iter().map(|name| (name.clone(), 0)).collect();
                Self {
                    ordered,
                    base_hours,
                }
            }
        }
    }

    fn from_order_rows(universe: &[String], rows: &[OrderingRow]) -> Self {
        let mut roster = Self::default();

        for row in rows {
            let name = row.teacher.trim();
            if !universe.iter().any(|known| known == name) {
                continue;
            }
            if roster.contains(name) {
                continue;
            }
            roster.ordered.push(name.to_string());
            roster
                .base_hours
                .insert(name.to_string(), parse_hours(&row.hours_field));
        }

        for name in universe {
            if !roster.contains(name) {
                roster.ordered.push(name.clone());
                roster.base_hours.insert(name.clone(), 0);
            }
        }

        roster
    }

    /// All teachers in roster order.
    pub fn ordered_names(&self) -> &[String] {
        &self.ordered
    }

    /// Whether the given teacher belongs to the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.ordered.iter().any(|known| known == name)
    }

    /// The teacher's baseline required hours; 0 when the order source did
    /// not list them.
    pub fn base_hours(&self, name: &str) -> i32 {
        self.base_hours.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Hours values arrive as free text ("16", "16.0", "N/A", …). Integer parse
/// first, then float with truncation; anything else counts as 0.
fn parse_hours(raw: &str) -> i32 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value as i32,
        _ => 0,
    }
}
