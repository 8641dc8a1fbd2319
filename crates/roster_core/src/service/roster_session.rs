//! Front-end facing roster session.
//!
//! # Responsibility
//! - Own the mutation service, the editor draft, view parameters and the
//!   notice board for one front end.
//! - Recompute the filtered view and dashboard statistics after every
//!   mutation or view-parameter change.
//! - Turn mutation outcomes into success/error notices.
//!
//! # Invariants
//! - Derived state is always a full recomputation from the current store.
//! - A rejected operation changes nothing except the posted error notice.
//! - The draft is reset only after a successful add.

use crate::clock::{Clock, SystemClock};
use crate::config::RosterConfig;
use crate::model::grade::Grade;
use crate::model::student::{StudentDraft, StudentEdit, StudentId, StudentRecord};
use crate::notify::notice_board::{Notice, NoticeBoard};
use crate::repo::seed::demo_roster;
use crate::repo::student_repo::{InMemoryStudentRepository, StudentRepository};
use crate::search::roster_query::{derive, RosterQuery, SortField, SortState};
use crate::service::roster_service::{RosterError, RosterResult, RosterService};
use crate::stats::aggregate::{unique_grades, ChartSeries, RosterStats};
use log::debug;

pub const ADDED_MESSAGE: &str = "Student added successfully!";
pub const UPDATED_MESSAGE: &str = "Student updated successfully!";
pub const DELETED_MESSAGE: &str = "Student deleted successfully!";

/// Result of a delete request that passed id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(StudentRecord),
    /// The confirmation callback declined; nothing changed.
    Cancelled,
}

/// Session over the default in-memory store and wall clock.
pub type DefaultRosterSession = RosterSession<InMemoryStudentRepository, SystemClock>;

pub struct RosterSession<R: StudentRepository, C: Clock> {
    service: RosterService<R, C>,
    draft: StudentDraft,
    query: RosterQuery,
    notices: NoticeBoard,
    visible: Vec<StudentRecord>,
    stats: RosterStats,
    grades: Vec<Grade>,
}

impl DefaultRosterSession {
    /// Builds a session from config, seeding the demo roster when asked.
    pub fn from_config(config: &RosterConfig) -> Self {
        let clock = SystemClock;
        let records = if config.seed_demo_roster {
            demo_roster(clock.now_ms())
        } else {
            Vec::new()
        };
        // Demo records are valid with distinct ids, so this cannot fail; an
        // empty store is the fallback regardless.
        let repo = InMemoryStudentRepository::with_records(records).unwrap_or_default();
        Self::new(
            RosterService::new(repo, clock),
            NoticeBoard::new(config.notice_dismiss_after),
        )
    }
}

impl<R: StudentRepository, C: Clock> RosterSession<R, C> {
    pub fn new(service: RosterService<R, C>, notices: NoticeBoard) -> Self {
        let mut session = Self {
            service,
            draft: StudentDraft::default(),
            query: RosterQuery::default(),
            notices,
            visible: Vec::new(),
            stats: RosterStats::default(),
            grades: Vec::new(),
        };
        session.refresh();
        session
    }

    // --- view parameters ---

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.refresh();
    }

    /// `None` shows all grades.
    pub fn set_grade_filter(&mut self, grade: Option<Grade>) {
        self.query.grade_filter = grade;
        self.refresh();
    }

    /// Header-click sort: same field flips direction, new field ascends.
    pub fn sort_by(&mut self, field: SortField) {
        self.query.sort.select(field);
        self.refresh();
    }

    pub fn clear_sort(&mut self) {
        self.query.sort.clear();
        self.refresh();
    }

    // --- draft editing ---

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut StudentDraft {
        &mut self.draft
    }

    // --- mutations ---

    /// Adds the current draft as a new student.
    pub fn add_student(&mut self) -> RosterResult<StudentRecord> {
        let outcome = self.service.add(&self.draft);
        if outcome.is_ok() {
            self.draft.reset();
        }
        self.finish(outcome, ADDED_MESSAGE)
    }

    pub fn begin_edit(&mut self, id: StudentId) -> RosterResult<()> {
        match self.service.begin_edit(id) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.notices.error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn commit_edit(&mut self, id: StudentId, edit: &StudentEdit) -> RosterResult<StudentRecord> {
        let outcome = self.service.commit_edit(id, edit);
        self.finish(outcome, UPDATED_MESSAGE)
    }

    pub fn cancel_edit(&mut self, id: StudentId) -> bool {
        self.service.cancel_edit(id)
    }

    pub fn is_editing(&self, id: StudentId) -> bool {
        self.service.is_editing(id)
    }

    /// Deletes `id` after `confirm` approves the record.
    ///
    /// # Errors
    /// - `NotFound` when the id is absent; `confirm` is not called.
    pub fn delete_student<F>(&mut self, id: StudentId, confirm: F) -> RosterResult<DeleteOutcome>
    where
        F: FnOnce(&StudentRecord) -> bool,
    {
        let Some(record) = self.service.get(id) else {
            let err = RosterError::NotFound(id);
            self.notices.error(err.to_string());
            return Err(err);
        };
        if !confirm(record) {
            debug!("event=student_delete module=session status=cancelled id={}", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        let outcome = self.service.delete(id);
        self.finish(outcome, DELETED_MESSAGE)
            .map(DeleteOutcome::Deleted)
    }

    // --- derived state ---

    /// Records passing the current filters, in display order.
    pub fn visible(&self) -> &[StudentRecord] {
        &self.visible
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.service.records()
    }

    pub fn stats(&self) -> &RosterStats {
        &self.stats
    }

    pub fn chart_series(&self) -> ChartSeries {
        self.stats.histogram.chart_series()
    }

    /// Options for the grade filter dropdown.
    pub fn unique_grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn query(&self) -> &RosterQuery {
        &self.query
    }

    pub fn sort_state(&self) -> SortState {
        self.query.sort
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    fn finish(
        &mut self,
        outcome: RosterResult<StudentRecord>,
        success_message: &str,
    ) -> RosterResult<StudentRecord> {
        match &outcome {
            Ok(_) => {
                self.notices.success(success_message);
                self.refresh();
            }
            Err(err) => self.notices.error(err.to_string()),
        }
        outcome
    }

    fn refresh(&mut self) {
        let records = self.service.records();
        self.visible = derive(records, &self.query).into_iter().cloned().collect();
        self.stats = RosterStats::from_records(records);
        self.grades = unique_grades(records);
    }
}
