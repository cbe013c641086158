use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::model::{AssignmentRow, HOMEROOM_SUBJECT, NAME_SEPARATOR, NAN_TOKEN, UNKNOWN_TEACHER};

/// Controls how raw teacher fields are tokenised when building the index.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Drop the literal unknown-teacher sentinel when it appears as an
    /// assignment token. Rendered output occasionally gets re-imported as
    /// source data, which reintroduces the sentinel as if it were a name.
    pub drop_unknown_sentinel: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            drop_unknown_sentinel: true,
        }
    }
}

/// Queryable (class, subject) → teacher-list lookup built from the teaching
/// assignment table, together with the observed teacher universe and the
/// per-class homeroom display strings.
#[derive(Debug, Default)]
pub struct AssignmentIndex {
    lookup: HashMap<(String, String), Vec<String>>,
    universe: Vec<String>,
    homerooms: BTreeMap<String, String>,
}

impl AssignmentIndex {
    /// Builds the index with default [`ParseOptions`].
    pub fn build(rows: &[AssignmentRow]) -> Self {
        Self::build_with(rows, &ParseOptions::default())
    }

    /// Builds the index from typed assignment rows. Teacher fields are split
    /// on `/`, tokens trimmed, empty and sentinel tokens dropped. Homeroom
    /// rows record the *unsplit* raw teacher field, which may legitimately
    /// contain `/`-joined co-tutors verbatim.
    pub fn build_with(rows: &[AssignmentRow], options: &ParseOptions) -> Self {
        let mut index = Self::default();
        let mut seen = HashSet::new();

        for row in rows {
            for token in split_teacher_field(&row.teacher_field, options) {
                index
                    .lookup
                    .entry((row.class_id.clone(), row.subject.clone()))
                    .or_default()
                    .push(token.clone());
                if seen.insert(token.clone()) {
                    index.universe.push(token);
                }
            }
            if row.subject == HOMEROOM_SUBJECT {
                index
                    .homerooms
                    .insert(row.class_id.clone(), row.teacher_field.clone());
            }
        }

        debug!(
            assignments = index.lookup.len(),
            teachers = index.universe.len(),
            homerooms = index.homerooms.len(),
            "assignment index built"
        );
        index
    }

    /// The teachers assigned to the given class and subject, in source-row
    /// order. Repeated matches across rows concatenate in row order. Empty
    /// when nothing resolves.
    pub fn resolve(&self, class_id: &str, subject: &str) -> &[String] {
        self.lookup
            .get(&(class_id.to_string(), subject.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every teacher observed across all assignment rows, deduplicated, in
    /// first-seen order.
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    /// The raw homeroom teacher string recorded for the class, if any.
    pub fn homeroom(&self, class_id: &str) -> Option<&str> {
        self.homerooms.get(class_id).map(String::as_str)
    }

    /// class_id → raw homeroom teacher string, for every homeroom row seen.
    pub fn homerooms(&self) -> &BTreeMap<String, String> {
        &self.homerooms
    }
}

fn split_teacher_field(raw: &str, options: &ParseOptions) -> Vec<String> {
    raw.split(NAME_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != NAN_TOKEN)
        .filter(|token| !(options.drop_unknown_sentinel && *token == UNKNOWN_TEACHER))
        .map(str::to_string)
        .collect()
}
