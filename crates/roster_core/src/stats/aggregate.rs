//! Roster aggregates: averages, grade histogram and chart series.
//!
//! # Responsibility
//! - Summarize the whole store for the dashboard and grade chart.
//!
//! # Invariants
//! - Every figure is recomputed from the full record slice; nothing is cached.
//! - Averages over an empty store are `None`, never NaN.
//! - Histogram counts sum to the record count and keep first-seen order.

use crate::model::grade::Grade;
use crate::model::student::StudentRecord;
use serde::{Deserialize, Serialize};

/// Grade → count, in the order grades first appear in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeHistogram {
    buckets: Vec<(Grade, usize)>,
}

impl GradeHistogram {
    /// Single pass over `records`.
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let mut buckets: Vec<(Grade, usize)> = Vec::new();
        for record in records {
            match buckets.iter_mut().find(|(grade, _)| *grade == record.grade) {
                Some((_, count)) => *count += 1,
                None => buckets.push((record.grade, 1)),
            }
        }
        Self { buckets }
    }

    pub fn buckets(&self) -> &[(Grade, usize)] {
        &self.buckets
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.buckets
            .iter()
            .find(|(candidate, _)| *candidate == grade)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            label: GRADE_CHART_LABEL.to_string(),
            labels: self
                .buckets
                .iter()
                .map(|(grade, _)| grade.label().to_string())
                .collect(),
            values: self.buckets.iter().map(|(_, count)| *count).collect(),
        }
    }
}

pub const GRADE_CHART_LABEL: &str = "Grade Distribution";

/// Bar chart input: parallel label and value columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// Dashboard figures for one store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStats {
    pub total_students: usize,
    /// Mean grade points; `None` when the store is empty.
    pub average_grade: Option<f64>,
    /// Mean attendance percent; `None` when the store is empty.
    pub average_attendance: Option<f64>,
    pub low_attendance_count: usize,
    pub histogram: GradeHistogram,
}

impl RosterStats {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        Self {
            total_students: records.len(),
            average_grade: average_grade(records),
            average_attendance: average_attendance(records),
            low_attendance_count: records
                .iter()
                .filter(|record| record.has_low_attendance())
                .count(),
            histogram: GradeHistogram::from_records(records),
        }
    }
}

impl Default for RosterStats {
    fn default() -> Self {
        Self::from_records(&[])
    }
}

/// Mean of grade points across `records`.
pub fn average_grade(records: &[StudentRecord]) -> Option<f64> {
    mean(records.iter().map(|record| record.grade.points()))
}

/// Mean attendance percent across `records`.
pub fn average_attendance(records: &[StudentRecord]) -> Option<f64> {
    mean(records.iter().map(|record| f64::from(record.attendance)))
}

/// Distinct grade labels sorted by label text (`A` < `A+` < `A-` < `B`).
pub fn unique_grades(records: &[StudentRecord]) -> Vec<Grade> {
    let mut grades = Vec::<Grade>::new();
    for record in records {
        if !grades.contains(&record.grade) {
            grades.push(record.grade);
        }
    }
    grades.sort_by_key(|grade| grade.label());
    grades
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
