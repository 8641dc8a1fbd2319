use roster_core::{
    demo_roster, Grade, InMemoryStudentRepository, ManualClock, RepoError, RosterError,
    RosterService, StudentDraft, StudentEdit, StudentRecord, StudentRepository,
    StudentValidationError, Subject,
};

const T0: i64 = 1_700_000_000_000;

fn demo_service() -> (RosterService<InMemoryStudentRepository, ManualClock>, ManualClock) {
    let clock = ManualClock::new(T0);
    let repo = InMemoryStudentRepository::with_records(demo_roster(T0)).expect("demo roster should load");
    (RosterService::new(repo, clock.clone()), clock)
}

fn draft(name: &str) -> StudentDraft {
    StudentDraft {
        name: name.to_string(),
        email: "new@example.com".to_string(),
        age: Some(20),
        grade: "C".to_string(),
        attendance: Some(80),
        ..StudentDraft::default()
    }
}

#[test]
fn add_assigns_max_plus_one_and_stamps_both_dates() {
    let (mut service, clock) = demo_service();
    clock.set(T0 + 5_000);

    let mut candidate = draft("Grace Hopper");
    candidate.toggle_subject(Subject::History, true);
    let created = service.add(&candidate).expect("add should succeed");

    assert_eq!(created.id, 4);
    assert_eq!(created.grade, Grade::C);
    assert_eq!(created.enrollment_date, T0 + 5_000);
    assert_eq!(created.last_updated, T0 + 5_000);
    assert!(created.subjects.contains(&Subject::History));
    assert_eq!(service.records().len(), 4);
    assert_eq!(service.records().last(), Some(&created));
}

#[test]
fn add_on_empty_store_starts_at_one() {
    let mut service = RosterService::new(InMemoryStudentRepository::new(), ManualClock::new(T0));
    assert_eq!(service.add(&draft("First One")).expect("add should succeed").id, 1);
    assert_eq!(service.add(&draft("Second One")).expect("add should succeed").id, 2);
}

#[test]
fn add_uses_max_id_not_count_after_gaps() {
    let (mut service, _) = demo_service();
    service.delete(2).expect("delete should succeed");

    let created = service.add(&draft("Gap Filler")).expect("add should succeed");
    assert_eq!(created.id, 4);
}

#[test]
fn invalid_add_leaves_store_unchanged() {
    let (mut service, _) = demo_service();
    let before = service.records().to_vec();

    let err = service.add(&draft("X")).expect_err("add must fail");
    assert_eq!(err, RosterError::Validation(StudentValidationError::InvalidName));
    assert_eq!(service.records(), before.as_slice());
}

#[test]
fn commit_edit_requires_begin_edit() {
    let (mut service, _) = demo_service();
    let edit = StudentEdit {
        attendance: Some(50),
        ..StudentEdit::default()
    };

    assert_eq!(
        service.commit_edit(1, &edit).expect_err("commit must fail"),
        RosterError::NotEditing(1)
    );
    assert_eq!(
        service.begin_edit(99).expect_err("begin edit must fail"),
        RosterError::NotFound(99)
    );
}

#[test]
fn commit_edit_applies_fields_and_refreshes_last_updated() {
    let (mut service, clock) = demo_service();
    let before = service.get(2).cloned().expect("record should exist");

    service.begin_edit(2).expect("begin edit should succeed");
    assert!(service.is_editing(2));
    clock.advance(60_000);

    let updated = service
        .commit_edit(
            2,
            &StudentEdit {
                grade: Some("A".to_string()),
                attendance: Some(0),
                ..StudentEdit::default()
            },
        )
        .expect("commit should succeed");

    assert_eq!(updated.grade, Grade::A);
    assert_eq!(updated.attendance, 0);
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.enrollment_date, before.enrollment_date);
    assert_eq!(updated.last_updated, T0 + 60_000);
    assert!(updated.last_updated >= before.last_updated);
    assert!(!service.is_editing(2));
    assert_eq!(service.get(2), Some(&updated));
}

#[test]
fn commit_edit_never_moves_last_updated_backwards() {
    let (mut service, clock) = demo_service();
    clock.set(T0 - 10_000);

    service.begin_edit(1).expect("begin edit should succeed");
    let updated = service
        .commit_edit(
            1,
            &StudentEdit {
                age: Some(20),
                ..StudentEdit::default()
            },
        )
        .expect("commit should succeed");
    assert_eq!(updated.last_updated, T0);
}

#[test]
fn invalid_edit_keeps_record_identical_and_open() {
    let (mut service, clock) = demo_service();
    let before: StudentRecord = service.get(3).cloned().expect("record should exist");

    service.begin_edit(3).expect("begin edit should succeed");
    clock.advance(1_000);
    let err = service
        .commit_edit(
            3,
            &StudentEdit {
                email: Some("not-an-email".to_string()),
                ..StudentEdit::default()
            },
        )
        .expect_err("invalid email must be rejected");

    assert_eq!(err, RosterError::Validation(StudentValidationError::InvalidEmail));
    assert_eq!(service.get(3), Some(&before));
    assert!(service.is_editing(3));

    assert!(service.cancel_edit(3));
    assert!(!service.cancel_edit(3));
}

#[test]
fn delete_removes_exactly_one_record() {
    let (mut service, _) = demo_service();
    service.begin_edit(2).expect("begin edit should succeed");

    let removed = service.delete(2).expect("delete should succeed");
    assert_eq!(removed.name, "Jane Smith");
    assert!(!service.is_editing(2));

    let ids: Vec<_> = service.records().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn delete_missing_id_returns_not_found_and_keeps_store() {
    let (mut service, _) = demo_service();
    let before = service.records().to_vec();

    assert_eq!(service.delete(42).expect_err("delete must fail"), RosterError::NotFound(42));
    assert_eq!(service.records(), before.as_slice());
}

#[test]
fn repository_rejects_duplicate_and_invalid_records() {
    let mut repo = InMemoryStudentRepository::with_records(demo_roster(T0)).expect("demo roster should load");
    let duplicate = repo.get(1).cloned().expect("record should exist");
    assert_eq!(repo.insert(duplicate).expect_err("insert must fail"), RepoError::DuplicateId(1));

    let mut invalid = repo.get(1).cloned().expect("record should exist");
    invalid.id = 10;
    invalid.attendance = 120;
    assert!(matches!(
        repo.insert(invalid).expect_err("insert must fail"),
        RepoError::Validation(StudentValidationError::AttendanceOutOfRange(Some(120)))
    ));

    let mut missing = repo.get(1).cloned().expect("record should exist");
    missing.id = 77;
    assert_eq!(repo.replace(missing).expect_err("replace must fail"), RepoError::NotFound(77));
    assert_eq!(repo.len(), 3);
    assert_eq!(repo.max_id(), Some(3));
}
