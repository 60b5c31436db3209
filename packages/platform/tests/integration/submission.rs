use std::thread;
use std::time::Duration;

use platform::entity::TypingPoint;
use platform::models::NewSubmission;

use crate::common::{TestStore, ids};

fn attempt(problem_id: &str, student_id: &str, code: &str) -> NewSubmission {
    NewSubmission {
        problem_id: problem_id.to_string(),
        student_id: student_id.to_string(),
        class_id: ids::PERIOD_1.to_string(),
        final_code: code.to_string(),
        typing_history: Vec::new(),
    }
}

mod recording {
    use super::*;

    #[test]
    fn a_submission_gets_an_id_and_a_timestamp() {
        let mut t = TestStore::seeded();

        let submission = t
            .store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "def greet(): pass"));

        assert!(submission.id.starts_with("sub-"));
        assert_eq!(t.store.submission(&submission.id), Some(&submission));
    }

    #[test]
    fn typing_history_is_kept_in_arrival_order() {
        let mut t = TestStore::seeded();
        let mut data = attempt(ids::HELLO_WORLD, ids::ALICE, "x");
        data.typing_history = vec![
            TypingPoint {
                timestamp_ms: 0,
                code_length: 0,
            },
            TypingPoint {
                timestamp_ms: 1200,
                code_length: 14,
            },
            TypingPoint {
                timestamp_ms: 4800,
                code_length: 9,
            },
        ];

        let submission = t.store.add_submission(data);

        let lengths: Vec<_> = submission
            .typing_history
            .iter()
            .map(|p| p.code_length)
            .collect();
        assert_eq!(lengths, [0, 14, 9]);
    }

    #[test]
    fn references_are_not_validated() {
        let mut t = TestStore::seeded();

        let submission = t.store.add_submission(attempt("p99", "s99", "pass"));

        assert_eq!(t.store.submission(&submission.id), Some(&submission));
    }
}

mod queries {
    use super::*;

    #[test]
    fn submissions_for_a_problem_come_newest_first() {
        let mut t = TestStore::seeded();
        let first = t
            .store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "v1"));
        thread::sleep(Duration::from_millis(2));
        let second = t
            .store
            .add_submission(attempt(ids::HELLO_WORLD, ids::BOB, "v2"));
        thread::sleep(Duration::from_millis(2));
        let third = t
            .store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "v3"));
        t.store.add_submission(attempt(ids::SUM_TWO, ids::ALICE, "other"));

        let listed: Vec<_> = t
            .store
            .submissions_for_problem(ids::HELLO_WORLD)
            .into_iter()
            .map(|s| s.id.clone())
            .collect();

        assert_eq!(listed, [third.id, second.id, first.id]);
    }

    #[test]
    fn the_editor_prefill_takes_the_students_latest_attempt() {
        let mut t = TestStore::seeded();
        t.store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "v1"));
        thread::sleep(Duration::from_millis(2));
        t.store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "v2"));
        thread::sleep(Duration::from_millis(2));
        t.store
            .add_submission(attempt(ids::HELLO_WORLD, ids::BOB, "bobs"));

        let latest = t
            .store
            .latest_submission(ids::HELLO_WORLD, ids::ALICE)
            .expect("No submission found");

        assert_eq!(latest.final_code, "v2");
    }

    #[test]
    fn students_with_no_attempts_get_no_prefill() {
        let mut t = TestStore::seeded();
        t.store
            .add_submission(attempt(ids::HELLO_WORLD, ids::ALICE, "v1"));

        assert!(t.store.latest_submission(ids::HELLO_WORLD, ids::BOB).is_none());
        assert!(t.store.latest_submission(ids::SUM_TWO, ids::ALICE).is_none());
    }
}
