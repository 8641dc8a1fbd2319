//! Demo roster shipped with a fresh session.

use crate::model::grade::Grade;
use crate::model::student::StudentRecord;
use crate::model::subject::Subject;

/// 2023-09-01T00:00:00Z.
pub const DEMO_ENROLLMENT_MS: i64 = 1_693_526_400_000;

/// Three sample students enrolled on the demo date and stamped at `now_ms`.
pub fn demo_roster(now_ms: i64) -> Vec<StudentRecord> {
    let updated = now_ms.max(DEMO_ENROLLMENT_MS);
    let student = |id, name: &str, email: &str, age, grade, attendance, subjects: &[Subject]| {
        StudentRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age,
            grade,
            attendance,
            subjects: subjects.iter().copied().collect(),
            enrollment_date: DEMO_ENROLLMENT_MS,
            last_updated: updated,
        }
    };

    vec![
        student(
            1,
            "John Doe",
            "john@example.com",
            18,
            Grade::A,
            95,
            &[Subject::Mathematics, Subject::Physics, Subject::Chemistry],
        ),
        student(
            2,
            "Jane Smith",
            "jane@example.com",
            17,
            Grade::BPlus,
            88,
            &[Subject::Biology, Subject::Chemistry, Subject::English],
        ),
        student(
            3,
            "Bob Johnson",
            "bob@example.com",
            19,
            Grade::AMinus,
            72,
            &[Subject::Physics, Subject::ComputerScience],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{demo_roster, DEMO_ENROLLMENT_MS};

    #[test]
    fn demo_records_pass_validation() {
        for record in demo_roster(DEMO_ENROLLMENT_MS + 1) {
            record.validate().expect("demo record should be valid");
        }
    }

    #[test]
    fn demo_stamp_never_precedes_enrollment() {
        let records = demo_roster(0);
        assert!(records
            .iter()
            .all(|record| record.last_updated == DEMO_ENROLLMENT_MS));
    }
}
