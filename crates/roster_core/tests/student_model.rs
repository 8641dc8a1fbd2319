use roster_core::{
    Grade, StudentDraft, StudentEdit, StudentRecord, StudentValidationError, Subject,
};
use std::collections::BTreeSet;

fn sample_record() -> StudentRecord {
    StudentRecord {
        id: 7,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        age: 19,
        grade: Grade::AMinus,
        attendance: 91,
        subjects: [Subject::Mathematics, Subject::ComputerScience]
            .into_iter()
            .collect(),
        enrollment_date: 1_700_000_000_000,
        last_updated: 1_700_000_360_000,
    }
}

#[test]
fn default_draft_matches_empty_form() {
    let draft = StudentDraft::default();

    assert!(draft.name.is_empty());
    assert!(draft.email.is_empty());
    assert_eq!(draft.age, None);
    assert!(draft.grade.is_empty());
    assert_eq!(draft.attendance, Some(100));
    assert!(draft.subjects.is_empty());
}

#[test]
fn toggle_subject_adds_and_removes_without_duplicates() {
    let mut draft = StudentDraft::default();

    draft.toggle_subject(Subject::Physics, true);
    draft.toggle_subject(Subject::Physics, true);
    draft.toggle_subject(Subject::History, true);
    assert_eq!(draft.subjects.len(), 2);

    draft.toggle_subject(Subject::Physics, false);
    assert_eq!(
        draft.subjects,
        BTreeSet::from([Subject::History])
    );

    draft.reset();
    assert_eq!(draft, StudentDraft::default());
}

#[test]
fn apply_overlays_only_supplied_fields() {
    let record = sample_record();
    let mut draft = StudentDraft::from(&record);

    draft.apply(&StudentEdit {
        attendance: Some(60),
        grade: Some("B".to_string()),
        ..StudentEdit::default()
    });

    assert_eq!(draft.name, record.name);
    assert_eq!(draft.email, record.email);
    assert_eq!(draft.age, Some(19));
    assert_eq!(draft.grade, "B");
    assert_eq!(draft.attendance, Some(60));
}

#[test]
fn low_attendance_flag_uses_75_percent_threshold() {
    let mut record = sample_record();
    record.attendance = 75;
    assert!(!record.has_low_attendance());
    record.attendance = 74;
    assert!(record.has_low_attendance());
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let record = sample_record();

    let json = serde_json::to_value(&record).expect("record should serialize");
    assert_eq!(json["id"], 7);
    assert_eq!(json["grade"], "A-");
    assert_eq!(json["attendance"], 91);
    assert_eq!(
        json["subjects"],
        serde_json::json!(["Mathematics", "Computer Science"])
    );
    assert_eq!(json["enrollment_date"], 1_700_000_000_000_i64);

    let decoded: StudentRecord = serde_json::from_value(json).expect("record should deserialize");
    assert_eq!(decoded, record);
}

#[test]
fn validate_rejects_update_before_enrollment() {
    let mut record = sample_record();
    record.last_updated = record.enrollment_date - 1;

    assert_eq!(
        record.validate().expect_err("invalid record must fail validation"),
        StudentValidationError::TimestampOrder {
            enrolled: 1_700_000_000_000,
            updated: 1_699_999_999_999,
        }
    );
}

#[test]
fn deserialize_rejects_out_of_range_age() {
    let value = serde_json::json!({
        "id": 1,
        "name": "Too Young",
        "email": "young@example.com",
        "age": 12,
        "grade": "B",
        "attendance": 90,
        "subjects": [],
        "enrollment_date": 100,
        "last_updated": 100
    });

    let err = serde_json::from_value::<StudentRecord>(value).expect_err("invalid record must be rejected");
    assert!(
        err.to_string().contains("Age must be between 15 and 25"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_zero_id() {
    let mut json = serde_json::to_value(sample_record()).expect("record should serialize");
    json["id"] = serde_json::json!(0);

    let err = serde_json::from_value::<StudentRecord>(json).expect_err("invalid record must be rejected");
    assert!(err.to_string().contains("student id must be positive"));
}
