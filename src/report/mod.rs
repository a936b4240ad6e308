//! Match aggregation and rendering.
//!
//! [`Matches`] is the single accumulator of a run. Positions are kept in
//! ordered sets, so merging is a set union and rendering is deterministic
//! regardless of the order modules were scanned in.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A class of usage, independent of where it occurs.
///
/// Field order is the sort order: package, identifier, method, field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Match {
    /// Declaring package path.
    pub pkg: String,
    /// Package-level identifier.
    pub ident: String,
    /// Method name, for method queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Field name, for field queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Match {
    /// Match on a bare identifier.
    pub fn ident(pkg: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            pkg: pkg.into(),
            ident: ident.into(),
            method: None,
            field: None,
        }
    }

    /// Narrow to a method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Narrow to a field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pkg, self.ident)?;
        if let Some(method) = &self.method {
            return write!(f, ".{}()", method);
        }
        if let Some(field) = &self.field {
            return write!(f, ".{}", field);
        }
        Ok(())
    }
}

/// A concrete source location.
///
/// Field order is the sort order: file, line, column, offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// File path as reported by the loader.
    pub file: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
    /// Byte offset; only disambiguates, never rendered.
    #[serde(skip)]
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Every match found so far, with its unique positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    inner: BTreeMap<Match, BTreeSet<Position>>,
}

impl Matches {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence. Recording the same position twice is a no-op.
    pub fn add(&mut self, m: Match, pos: Position) {
        self.inner.entry(m).or_default().insert(pos);
    }

    /// Fold another report into this one (set union per match).
    pub fn merge(&mut self, other: Matches) {
        for (m, positions) in other.inner {
            match self.inner.get_mut(&m) {
                Some(existing) => existing.extend(positions),
                None => {
                    self.inner.insert(m, positions);
                }
            }
        }
    }

    /// Number of distinct matches.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of positions across all matches.
    pub fn total_positions(&self) -> usize {
        self.inner.values().map(BTreeSet::len).sum()
    }

    /// Positions recorded for a match.
    pub fn positions(&self, m: &Match) -> Option<&BTreeSet<Position>> {
        self.inner.get(m)
    }

    /// Matches and their positions in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&Match, &BTreeSet<Position>)> {
        self.inner.iter()
    }

    /// Render the canonical text form.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Serializable view, in render order.
    pub fn to_entries(&self) -> Vec<MatchEntry> {
        self.iter()
            .map(|(m, positions)| MatchEntry {
                target: m.clone(),
                positions: positions.iter().cloned().collect(),
            })
            .collect()
    }
}

impl fmt::Display for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (m, positions) in self.iter() {
            writeln!(f, "{}:", m)?;
            for pos in positions {
                writeln!(f, "\t{}", pos)?;
            }
        }
        Ok(())
    }
}

impl Extend<(Match, Position)> for Matches {
    fn extend<I: IntoIterator<Item = (Match, Position)>>(&mut self, iter: I) {
        for (m, pos) in iter {
            self.add(m, pos);
        }
    }
}

impl FromIterator<(Match, Position)> for Matches {
    fn from_iter<I: IntoIterator<Item = (Match, Position)>>(iter: I) -> Self {
        let mut matches = Matches::new();
        matches.extend(iter);
        matches
    }
}

/// One match with its positions, as emitted in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    /// The match key.
    #[serde(flatten)]
    pub target: Match,
    /// Sorted unique positions.
    pub positions: Vec<Position>,
}
