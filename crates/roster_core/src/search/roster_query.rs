//! Search, grade filter and sort over roster records.
//!
//! # Responsibility
//! - Decide which records match a search term and grade filter.
//! - Order matches by an explicit sortable field.
//!
//! # Invariants
//! - Search matches name OR email, case-insensitively; the grade filter is
//!   ANDed on top.
//! - Sorting is stable in both directions: records with equal keys keep
//!   their store order.
//! - Deriving never mutates or reorders the store itself.

use crate::model::grade::Grade;
use crate::model::student::StudentRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Columns the roster table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Email,
    Grade,
    Age,
    Attendance,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Email,
        SortField::Grade,
        SortField::Age,
        SortField::Attendance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Grade => "grade",
            SortField::Age => "age",
            SortField::Attendance => "attendance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }

    /// Text form compared when sorting by this field.
    ///
    /// Numeric columns are zero-padded to a fixed width so that text order
    /// agrees with numeric order.
    pub fn sort_key(self, record: &StudentRecord) -> String {
        match self {
            SortField::Name => record.name.clone(),
            SortField::Email => record.email.clone(),
            SortField::Grade => record.grade.label().to_string(),
            SortField::Age => format!("{:03}", record.age),
            SortField::Attendance => format!("{:03}", record.attendance),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction. No column means store order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    field: Option<SortField>,
    direction: SortDirection,
}

impl SortState {
    pub fn new(field: Option<SortField>, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click semantics: the same field flips direction, a new field
    /// starts ascending.
    pub fn select(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self) -> Option<SortField> {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == SortDirection::Ascending
    }
}

/// View parameters for one roster table render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    /// Substring matched against name or email. Empty matches all.
    pub search_term: String,
    /// Exact grade match. `None` matches all.
    pub grade_filter: Option<Grade>,
    pub sort: SortState,
}

/// Derives the filtered, sorted view over `records`.
pub fn derive<'a>(records: &'a [StudentRecord], query: &RosterQuery) -> Vec<&'a StudentRecord> {
    let needle = query.search_term.to_lowercase();
    let filtered = records
        .iter()
        .filter(|record| matches_filters(record, &needle, query.grade_filter));

    let Some(field) = query.sort.field() else {
        return filtered.collect();
    };

    let mut keyed = filtered
        .map(|record| {
            let key = field.sort_key(record);
            (key.to_lowercase(), key, record)
        })
        .collect::<Vec<_>>();

    let ascending = query.sort.is_ascending();
    // `sort_by` is stable; descending compares swapped operands so ties
    // still keep store order.
    keyed.sort_by(|(a_folded, a_raw, _), (b_folded, b_raw, _)| {
        if ascending {
            compare_keys(a_folded, a_raw, b_folded, b_raw)
        } else {
            compare_keys(b_folded, b_raw, a_folded, a_raw)
        }
    });

    keyed.into_iter().map(|(_, _, record)| record).collect()
}

fn matches_filters(record: &StudentRecord, needle: &str, grade_filter: Option<Grade>) -> bool {
    let matches_search = needle.is_empty()
        || record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle);
    let matches_grade = grade_filter.map_or(true, |grade| record.grade == grade);
    matches_search && matches_grade
}

fn compare_keys(a_folded: &str, a_raw: &str, b_folded: &str, b_raw: &str) -> Ordering {
    a_folded.cmp(b_folded).then_with(|| a_raw.cmp(b_raw))
}
