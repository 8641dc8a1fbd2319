use roster_core::{validate, Grade, StudentDraft, StudentValidationError};

fn valid_draft() -> StudentDraft {
    StudentDraft {
        name: "Jane Smith".to_string(),
        email: "jane@example.com".to_string(),
        age: Some(17),
        grade: "B+".to_string(),
        attendance: Some(88),
        ..StudentDraft::default()
    }
}

#[test]
fn valid_draft_produces_typed_fields() {
    let fields = validate(&valid_draft()).expect("valid draft should pass");
    assert_eq!(fields.name, "Jane Smith");
    assert_eq!(fields.age, 17);
    assert_eq!(fields.grade, Grade::BPlus);
    assert_eq!(fields.attendance, 88);
}

#[test]
fn name_must_have_two_characters() {
    for name in ["", "J", " "] {
        let draft = StudentDraft {
            name: name.to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).expect_err("draft must be rejected"),
            StudentValidationError::InvalidName,
            "name {name:?} should be rejected"
        );
    }

    for name in ["Jo", " J", "  "] {
        let draft = StudentDraft {
            name: name.to_string(),
            ..valid_draft()
        };
        let fields = validate(&draft).expect("two-character name should pass");
        assert_eq!(fields.name, name, "name should be kept as entered");
    }
}

#[test]
fn email_must_match_local_at_domain_tld() {
    for email in ["", "jane", "jane@example", "jane @example.com", "@x.io"] {
        let draft = StudentDraft {
            email: email.to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).expect_err("draft must be rejected"),
            StudentValidationError::InvalidEmail,
            "email {email:?} should be rejected"
        );
    }
}

#[test]
fn age_bounds_are_inclusive() {
    for age in [15, 25] {
        let draft = StudentDraft {
            age: Some(age),
            ..valid_draft()
        };
        assert!(validate(&draft).is_ok(), "age {age} should pass");
    }

    for age in [Some(14), Some(26), Some(0), Some(-3), None] {
        let draft = StudentDraft {
            age,
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).expect_err("draft must be rejected"),
            StudentValidationError::AgeOutOfRange(age)
        );
    }
}

#[test]
fn grade_must_be_selected_and_known() {
    let blank = StudentDraft {
        grade: "  ".to_string(),
        ..valid_draft()
    };
    assert_eq!(
        validate(&blank).expect_err("draft must be rejected"),
        StudentValidationError::MissingGrade
    );

    let unknown = StudentDraft {
        grade: "E".to_string(),
        ..valid_draft()
    };
    assert_eq!(
        validate(&unknown).expect_err("draft must be rejected"),
        StudentValidationError::UnknownGrade("E".to_string())
    );
}

#[test]
fn attendance_bounds_are_inclusive() {
    for attendance in [0, 100] {
        let draft = StudentDraft {
            attendance: Some(attendance),
            ..valid_draft()
        };
        assert!(
            validate(&draft).is_ok(),
            "attendance {attendance} should pass"
        );
    }

    for attendance in [Some(-1), Some(101), None] {
        let draft = StudentDraft {
            attendance,
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).expect_err("draft must be rejected"),
            StudentValidationError::AttendanceOutOfRange(attendance)
        );
    }
}

#[test]
fn first_failed_rule_wins() {
    let draft = StudentDraft {
        name: "X".to_string(),
        email: "broken".to_string(),
        age: Some(99),
        grade: String::new(),
        attendance: Some(500),
        ..StudentDraft::default()
    };
    assert_eq!(
        validate(&draft).expect_err("draft must be rejected"),
        StudentValidationError::InvalidName
    );

    let draft = StudentDraft {
        name: "Xavier".to_string(),
        ..draft
    };
    assert_eq!(
        validate(&draft).expect_err("draft must be rejected"),
        StudentValidationError::InvalidEmail
    );
}

#[test]
fn error_messages_are_user_facing() {
    assert_eq!(
        StudentValidationError::InvalidName.to_string(),
        "Please enter a valid name"
    );
    assert_eq!(
        StudentValidationError::InvalidEmail.to_string(),
        "Please enter a valid email address"
    );
    assert_eq!(
        StudentValidationError::AgeOutOfRange(Some(30)).to_string(),
        "Age must be between 15 and 25"
    );
    assert_eq!(
        StudentValidationError::MissingGrade.to_string(),
        "Please select a grade"
    );
    assert_eq!(
        StudentValidationError::AttendanceOutOfRange(None).to_string(),
        "Attendance must be between 0 and 100"
    );
}
