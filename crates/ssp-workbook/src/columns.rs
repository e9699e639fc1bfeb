//! # Column Mapping
//!
//! Resolves the six logical columns of an SSP worksheet to 1-based column
//! positions in two explicit passes.
//!
//! ## Pass 1: header hints
//!
//! Row 1 is scanned left to right. Each header cell is trimmed and
//! lower-cased; the first logical column (in [`Column::all`] order) that is
//! not yet resolved and has a hint occurring in the header claims the cell.
//!
//! ## Pass 2: override policy
//!
//! [`ColumnOverridePolicy`] then applies *forced* positions, which replace
//! whatever pass 1 found, and *fallback* positions, which apply only when
//! pass 1 found nothing. The shipped template forces the identifier to
//! column D and applicability to column I, and falls back to column O for
//! the description.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkbookError;
use crate::sheet::Sheet;

/// Logical worksheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Control identifier.
    Identifier,
    /// Control description.
    Description,
    /// Responsible entity (written).
    ResponsibleEntity,
    /// Implementation status (written).
    ImplementationStatus,
    /// Implementation comments (written).
    ImplementationComments,
    /// Applicability flag for the assessed classification.
    Applicability,
}

impl Column {
    /// All columns, in hint-matching order.
    pub fn all() -> &'static [Column] {
        &[
            Self::Identifier,
            Self::Description,
            Self::ResponsibleEntity,
            Self::ImplementationStatus,
            Self::ImplementationComments,
            Self::Applicability,
        ]
    }

    /// The snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Description => "description",
            Self::ResponsibleEntity => "responsible_entity",
            Self::ImplementationStatus => "implementation_status",
            Self::ImplementationComments => "implementation_comments",
            Self::Applicability => "applicability",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header substrings per logical column (lower-case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderHints {
    /// Control identifier, e.g. "Identifier".
    pub identifier: Vec<String>,
    /// Control text.
    pub description: Vec<String>,
    /// Where the owner label is written.
    pub responsible_entity: Vec<String>,
    /// Where Comply / Partial / Gap is written.
    pub implementation_status: Vec<String>,
    /// Where the justification is written.
    pub implementation_comments: Vec<String>,
    /// Per-row applicability flag for the assessed class.
    pub applicability: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for HeaderHints {
    fn default() -> Self {
        Self {
            identifier: strings(&["identifier", "control id", "id"]),
            description: strings(&["description", "control description"]),
            responsible_entity: strings(&["responsible entity", "owner", "responsible", "entity"]),
            implementation_status: strings(&["implementation status", "status"]),
            implementation_comments: strings(&[
                "implementation comments",
                "comments",
                "rationale",
                "remediation",
            ]),
            applicability: strings(&[
                "p applicability",
                "protected applicability",
                "applicability (p)",
                "p relevant",
                "protected relevant",
                "relevant to p",
            ]),
        }
    }
}

impl HeaderHints {
    /// Hints for one column.
    pub fn for_column(&self, column: Column) -> &[String] {
        match column {
            Column::Identifier => &self.identifier,
            Column::Description => &self.description,
            Column::ResponsibleEntity => &self.responsible_entity,
            Column::ImplementationStatus => &self.implementation_status,
            Column::ImplementationComments => &self.implementation_comments,
            Column::Applicability => &self.applicability,
        }
    }

    fn matches(&self, column: Column, header: &str) -> bool {
        self.for_column(column)
            .iter()
            .map(|h| h.trim().to_lowercase())
            .any(|h| !h.is_empty() && header.contains(&h))
    }
}

/// Second-pass positions applied after header matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverridePolicy {
    /// Positions that always win.
    pub forced: BTreeMap<Column, u32>,
    /// Positions used only when header matching found nothing.
    pub fallback: BTreeMap<Column, u32>,
}

impl Default for ColumnOverridePolicy {
    fn default() -> Self {
        Self {
            forced: BTreeMap::from([(Column::Identifier, 4), (Column::Applicability, 9)]),
            fallback: BTreeMap::from([(Column::Description, 15)]),
        }
    }
}

impl ColumnOverridePolicy {
    /// No overrides: header matching alone decides.
    pub fn none() -> Self {
        Self {
            forced: BTreeMap::new(),
            fallback: BTreeMap::new(),
        }
    }

    /// Apply forced and fallback positions to a header-matching result.
    pub fn apply(&self, mut found: BTreeMap<Column, u32>) -> BTreeMap<Column, u32> {
        for (column, position) in &self.forced {
            if let Some(previous) = found.insert(*column, *position) {
                if previous != *position {
                    tracing::debug!(%column, header = previous, forced = position, "forced column position");
                }
            }
        }
        for (column, position) in &self.fallback {
            found.entry(*column).or_insert_with(|| {
                tracing::debug!(%column, fallback = position, "header not found; using fallback position");
                *position
            });
        }
        found
    }
}

/// Resolved 1-based column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    /// Control identifier (read).
    pub identifier: u32,
    /// Control description (read).
    pub description: u32,
    /// Responsible entity (written).
    pub responsible_entity: u32,
    /// Implementation status (written).
    pub implementation_status: u32,
    /// Implementation comments (written).
    pub implementation_comments: u32,
    /// Applicability flag (read).
    pub is_applicable: u32,
}

impl ColumnMap {
    /// Position of a logical column.
    pub fn position(&self, column: Column) -> u32 {
        match column {
            Column::Identifier => self.identifier,
            Column::Description => self.description,
            Column::ResponsibleEntity => self.responsible_entity,
            Column::ImplementationStatus => self.implementation_status,
            Column::ImplementationComments => self.implementation_comments,
            Column::Applicability => self.is_applicable,
        }
    }
}

/// Pass 1 only: header-hint positions found in row 1.
pub fn match_headers<S: Sheet + ?Sized>(sheet: &S, hints: &HeaderHints) -> BTreeMap<Column, u32> {
    let mut found = BTreeMap::new();
    for col in 1..=sheet.highest_column() {
        let header = sheet.cell_text(col, 1).trim().to_lowercase();
        if header.is_empty() {
            continue;
        }
        let claimant = Column::all()
            .iter()
            .copied()
            .filter(|c| !found.contains_key(c))
            .find(|c| hints.matches(*c, &header));
        if let Some(column) = claimant {
            found.insert(column, col);
        }
    }
    found
}

/// Resolve all six columns, failing on the first one left unresolved.
pub fn map_columns<S: Sheet + ?Sized>(
    sheet: &S,
    hints: &HeaderHints,
    policy: &ColumnOverridePolicy,
) -> Result<ColumnMap, WorkbookError> {
    let resolved = policy.apply(match_headers(sheet, hints));
    let get = |column: Column| {
        resolved
            .get(&column)
            .copied()
            .ok_or(WorkbookError::ColumnNotResolved { column })
    };
    let map = ColumnMap {
        identifier: get(Column::Identifier)?,
        description: get(Column::Description)?,
        responsible_entity: get(Column::ResponsibleEntity)?,
        implementation_status: get(Column::ImplementationStatus)?,
        implementation_comments: get(Column::ImplementationComments)?,
        is_applicable: get(Column::Applicability)?,
    };
    tracing::info!(sheet = sheet.name(), columns = ?map, "columns mapped");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::MemorySheet;

    fn header(cells: &[&str]) -> MemorySheet {
        MemorySheet::from_rows("March 2025", [cells.to_vec()])
    }

    const TEMPLATE: [&str; 18] = [
        "Section", "Topic", "Guideline", "Identifier", "Revision", "Updated", "OFFICIAL",
        "NC", "P Applicability", "S", "TS", "ML", "E8", "Ref", "Description",
        "Responsible Entity", "Implementation Status", "Implementation Comments",
    ];

    #[test]
    fn template_header_maps_by_name() {
        let map = map_columns(&header(&TEMPLATE), &HeaderHints::default(), &ColumnOverridePolicy::default())
            .unwrap();
        assert_eq!(map.identifier, 4);
        assert_eq!(map.is_applicable, 9);
        assert_eq!(map.description, 15);
        assert_eq!(map.responsible_entity, 16);
        assert_eq!(map.implementation_status, 17);
        assert_eq!(map.implementation_comments, 18);
    }

    #[test]
    fn status_header_matches_in_any_case() {
        for spelling in ["Implementation Status", "IMPLEMENTATION STATUS", "  implementation status "] {
            let found = match_headers(&header(&["x", spelling]), &HeaderHints::default());
            assert_eq!(found.get(&Column::ImplementationStatus), Some(&2), "{spelling}");
        }
    }

    #[test]
    fn mislabeled_identifier_still_resolves_to_forced_position() {
        let mut cells = TEMPLATE;
        cells[3] = "Ctrl";
        cells[0] = "Control ID";
        let map = map_columns(&header(&cells), &HeaderHints::default(), &ColumnOverridePolicy::default())
            .unwrap();
        assert_eq!(map.identifier, 4);
    }

    #[test]
    fn description_falls_back_only_when_missing() {
        let mut cells = TEMPLATE;
        cells[14] = "Text";
        let map = map_columns(&header(&cells), &HeaderHints::default(), &ColumnOverridePolicy::default())
            .unwrap();
        assert_eq!(map.description, 15);

        let mut cells = TEMPLATE.to_vec();
        cells.swap(14, 1);
        let map = map_columns(&header(&cells), &HeaderHints::default(), &ColumnOverridePolicy::default())
            .unwrap();
        assert_eq!(map.description, 2);
    }

    #[test]
    fn each_header_cell_is_claimed_once() {
        // "Responsible Entity Status" claims responsible entity; the
        // status column must come from a later cell.
        let found = match_headers(
            &header(&["Responsible Entity Status", "Status"]),
            &HeaderHints::default(),
        );
        assert_eq!(found.get(&Column::ResponsibleEntity), Some(&1));
        assert_eq!(found.get(&Column::ImplementationStatus), Some(&2));
    }

    #[test]
    fn missing_required_column_is_named() {
        let cells: Vec<&str> = TEMPLATE.iter().copied().filter(|c| *c != "Implementation Comments").collect();
        let err = map_columns(&header(&cells), &HeaderHints::default(), &ColumnOverridePolicy::default())
            .unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::ColumnNotResolved { column: Column::ImplementationComments }
        ));
        assert!(err.to_string().contains("implementation_comments"));
    }

    #[test]
    fn without_policy_guideline_header_steals_identifier() {
        // "guideline" contains the "id" hint and comes before "Identifier".
        let map = map_columns(&header(&TEMPLATE), &HeaderHints::default(), &ColumnOverridePolicy::none())
            .unwrap();
        assert_eq!(map.identifier, 3);
        assert_eq!(map.position(Column::Applicability), 9);
    }

    #[test]
    fn policy_from_yaml() {
        let policy: ColumnOverridePolicy =
            serde_yaml::from_str("forced:\n  identifier: 2\nfallback: {}\n").unwrap();
        assert_eq!(policy.forced.get(&Column::Identifier), Some(&2));
        assert!(policy.fallback.is_empty());
    }
}
