use platform::StoreError;
use platform::entity::{Classroom, Role, Student};
use platform::models::StudentPatch;
use platform::roster;

use crate::common::{TestStore, ids, new_student};

mod registration {
    use super::*;

    #[test]
    fn a_new_student_joins_the_roster_and_the_classroom() {
        let mut t = TestStore::seeded();

        let student = t
            .store
            .add_student_to_classroom(
                new_student("Eve", "eve", "pw", Some("2024005")),
                ids::PERIOD_1,
            )
            .expect("Registration failed");

        let members = t.store.students_in(ids::PERIOD_1);
        assert_eq!(members.len(), 3);
        assert_eq!(members[2].id, student.id);

        let user = t
            .store
            .users()
            .into_iter()
            .find(|u| u.username == "eve")
            .expect("Derived user missing");
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.class_id.as_deref(), Some(ids::PERIOD_1));
    }

    #[test]
    fn username_collisions_are_rejected_case_insensitively() {
        let mut t = TestStore::seeded();

        let err = t
            .store
            .add_student_to_classroom(new_student("Imposter", "ALICE", "pw", None), ids::PERIOD_1)
            .unwrap_err();

        assert_eq!(err.to_string(), "Username \"ALICE\" already exists.");
        assert_eq!(t.store.students().len(), 4);
        assert_eq!(t.store.students_in(ids::PERIOD_1).len(), 2);
    }

    #[test]
    fn the_fixed_teacher_account_blocks_its_username_too() {
        let mut t = TestStore::seeded();

        let err = t
            .store
            .add_student_to_classroom(new_student("Imposter", "Teacher", "pw", None), ids::PERIOD_1)
            .unwrap_err();

        assert!(matches!(err, StoreError::UsernameExists(_)));
    }

    #[test]
    fn student_number_collisions_are_rejected() {
        let mut t = TestStore::seeded();

        let err = t
            .store
            .add_student_to_classroom(
                new_student("Eve", "eve", "pw", Some("2024001")),
                ids::PERIOD_1,
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "Student number \"2024001\" already exists.");
        assert_eq!(t.store.students().len(), 4);
    }

    #[test]
    fn empty_student_numbers_are_stored_as_absent_and_never_collide() {
        let mut t = TestStore::seeded();

        let eve = t
            .store
            .add_student_to_classroom(new_student("Eve", "eve", "pw", Some("")), ids::PERIOD_1)
            .expect("First registration failed");
        let frank = t
            .store
            .add_student_to_classroom(new_student("Frank", "frank", "pw", Some("")), ids::PERIOD_1)
            .expect("Second registration failed");

        assert_eq!(eve.student_number, None);
        assert_eq!(frank.student_number, None);
    }

    #[test]
    fn an_unknown_classroom_still_registers_the_student() {
        let mut t = TestStore::seeded();

        let student = t
            .store
            .add_student_to_classroom(new_student("Eve", "eve", "pw", None), "c9")
            .expect("Registration failed");

        assert_eq!(t.store.students().len(), 5);
        assert_eq!(t.store.students_in(ids::PERIOD_1).len(), 2);
        assert_eq!(t.store.students_in(ids::PERIOD_3).len(), 2);

        let user = t
            .store
            .users()
            .into_iter()
            .find(|u| u.id == student.id)
            .expect("Derived user missing");
        assert_eq!(user.class_id, None);
    }

    #[test]
    fn a_fresh_classroom_accepts_a_username_only_once() {
        let mut t = TestStore::empty();
        let classroom = t.store.add_classroom("C1");

        t.store
            .add_student_to_classroom(new_student("A", "a", "p", None), &classroom.id)
            .expect("First registration failed");

        let members = t.store.students_in(&classroom.id);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "A");

        let err = t
            .store
            .add_student_to_classroom(new_student("B", "a", "p2", None), &classroom.id)
            .unwrap_err();

        assert_eq!(err.to_string(), "Username \"a\" already exists.");
        assert_eq!(t.store.students_in(&classroom.id).len(), 1);
    }
}

mod batch_registration {
    use super::*;

    #[test]
    fn a_clean_batch_is_applied_in_order() {
        let mut t = TestStore::seeded();
        let batch = vec![
            new_student("Eve", "eve", "pw", Some("2024005")),
            new_student("Frank", "frank", "pw", None),
            new_student("Grace", "grace", "pw", Some("2024007")),
        ];

        let added = t
            .store
            .add_students_to_classroom(batch, ids::PERIOD_1)
            .expect("Batch failed");

        assert_eq!(added, 3);
        let members = t.store.students_in(ids::PERIOD_1);
        assert_eq!(members.len(), 5);
        let names: Vec<_> = members[2..].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Eve", "Frank", "Grace"]);
    }

    #[test]
    fn a_collision_with_existing_data_rolls_back_the_whole_batch() {
        let mut t = TestStore::seeded();
        let batch = vec![
            new_student("Eve", "eve", "pw", None),
            new_student("Imposter", "Bob", "pw", None),
            new_student("Grace", "grace", "pw", None),
        ];

        let err = t
            .store
            .add_students_to_classroom(batch, ids::PERIOD_1)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Username \"Bob\" already exists. Batch registration cancelled."
        );
        assert_eq!(t.store.students().len(), 4);
        assert_eq!(t.store.students_in(ids::PERIOD_1).len(), 2);
    }

    #[test]
    fn duplicate_usernames_inside_one_batch_are_rejected() {
        let mut t = TestStore::seeded();
        let batch = vec![
            new_student("Sam", "sam", "pw", None),
            new_student("Samantha", "SAM", "pw", None),
        ];

        let err = t
            .store
            .add_students_to_classroom(batch, ids::PERIOD_1)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Username \"SAM\" already exists. Batch registration cancelled."
        );
        assert_eq!(t.store.students().len(), 4);
    }

    #[test]
    fn duplicate_student_numbers_inside_one_batch_are_rejected() {
        let mut t = TestStore::seeded();
        let batch = vec![
            new_student("Eve", "eve", "pw", Some("2030")),
            new_student("Frank", "frank", "pw", Some("2030")),
        ];

        let err = t
            .store
            .add_students_to_classroom(batch, ids::PERIOD_1)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Student number \"2030\" already exists. Batch registration cancelled."
        );
        assert_eq!(t.store.students().len(), 4);
    }

    #[test]
    fn an_empty_batch_is_a_no_op() {
        let mut t = TestStore::seeded();

        let added = t
            .store
            .add_students_to_classroom(Vec::new(), ids::PERIOD_1)
            .expect("Batch failed");

        assert_eq!(added, 0);
        assert_eq!(t.store.students_in(ids::PERIOD_1).len(), 2);
    }

    #[test]
    fn a_parsed_roster_feeds_batch_registration() {
        let mut t = TestStore::seeded();
        let csv = "\
name,username,password,studentNumber
Eve,eve,pw1,2025001
Frank,frank,pw2,
";

        let entries = roster::parse_roster(csv.as_bytes()).expect("Roster parsing failed");
        let added = t
            .store
            .add_students_to_classroom(entries, ids::PERIOD_1)
            .expect("Batch failed");

        assert_eq!(added, 2);
        let members = t.store.students_in(ids::PERIOD_1);
        assert_eq!(members[2].student_number.as_deref(), Some("2025001"));
        assert_eq!(members[3].student_number, None);
    }
}

mod editing {
    use super::*;

    #[test]
    fn renaming_to_a_taken_username_fails() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            username: Some("bob".to_string()),
            ..Default::default()
        };

        let err = t.store.update_student(ids::ALICE, patch).unwrap_err();

        assert_eq!(err.to_string(), "Username \"bob\" is already taken.");
        assert_eq!(
            t.store.student(ids::ALICE).map(|s| s.username.as_str()),
            Some("alice")
        );
    }

    #[test]
    fn a_student_keeps_the_right_to_their_own_username() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            username: Some("ALICE".to_string()),
            ..Default::default()
        };

        t.store
            .update_student(ids::ALICE, patch)
            .expect("Update failed");

        assert_eq!(
            t.store.student(ids::ALICE).map(|s| s.username.as_str()),
            Some("ALICE")
        );
        t.store
            .login("alice", "password123")
            .expect("Case-insensitive login failed after rename");
    }

    #[test]
    fn an_empty_password_keeps_the_current_one() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            name: Some("Alice B.".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };

        t.store
            .update_student(ids::ALICE, patch)
            .expect("Update failed");

        assert_eq!(
            t.store.student(ids::ALICE).map(|s| s.name.as_str()),
            Some("Alice B.")
        );
        t.store
            .login("alice", "password123")
            .expect("Original password no longer accepted");
    }

    #[test]
    fn a_new_password_replaces_the_old_one() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            password: Some("s3cret".to_string()),
            ..Default::default()
        };

        t.store
            .update_student(ids::ALICE, patch)
            .expect("Update failed");

        let err = t.store.login("alice", "password123").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        t.store
            .login("alice", "s3cret")
            .expect("New password not accepted");
    }

    #[test]
    fn an_empty_student_number_clears_it_and_frees_it() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            student_number: Some(String::new()),
            ..Default::default()
        };

        t.store
            .update_student(ids::ALICE, patch)
            .expect("Update failed");
        assert_eq!(
            t.store.student(ids::ALICE).and_then(|s| s.student_number.clone()),
            None
        );

        t.store
            .add_student_to_classroom(
                new_student("Eve", "eve", "pw", Some("2024001")),
                ids::PERIOD_1,
            )
            .expect("Freed student number was still blocked");
    }

    #[test]
    fn a_taken_student_number_is_rejected() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            student_number: Some("2024002".to_string()),
            ..Default::default()
        };

        let err = t.store.update_student(ids::ALICE, patch).unwrap_err();

        assert_eq!(err.to_string(), "Student number \"2024002\" is already taken.");
    }

    #[test]
    fn updating_an_unknown_student_changes_nothing() {
        let mut t = TestStore::seeded();
        let patch = StudentPatch {
            name: Some("Nobody".to_string()),
            ..Default::default()
        };

        t.store.update_student("s9", patch).expect("Update failed");

        assert_eq!(t.store.students().len(), 4);
        assert!(t.store.students().iter().all(|s| s.name != "Nobody"));
    }
}

mod derived_users {
    use super::*;

    #[test]
    fn the_user_list_is_rebuilt_on_every_read() {
        let mut t = TestStore::seeded();
        assert_eq!(t.store.users().len(), 5);

        t.store
            .add_student_to_classroom(new_student("Eve", "eve", "pw", None), ids::PERIOD_1)
            .expect("Registration failed");

        assert_eq!(t.store.users().len(), 6);
    }

    #[test]
    fn membership_determines_the_class_of_each_user() {
        let t = TestStore::seeded();
        let users = t.store.users();

        let teacher = users.iter().find(|u| u.role == Role::Teacher).unwrap();
        assert_eq!(teacher.class_id, None);

        let alice = users.iter().find(|u| u.id == ids::ALICE).unwrap();
        assert_eq!(alice.class_id.as_deref(), Some(ids::PERIOD_1));

        let charlie = users.iter().find(|u| u.id == ids::CHARLIE).unwrap();
        assert_eq!(charlie.class_id.as_deref(), Some(ids::PERIOD_3));
    }

    #[test]
    fn the_first_classroom_containing_a_student_wins() {
        let mut t = TestStore::empty();
        let student = Student {
            id: "s9".to_string(),
            name: "Eve".to_string(),
            username: "eve".to_string(),
            password: "pw".to_string(),
            student_number: None,
        };
        let classrooms = vec![
            Classroom {
                id: "cA".to_string(),
                name: "First".to_string(),
                student_ids: vec!["s9".to_string()],
            },
            Classroom {
                id: "cB".to_string(),
                name: "Second".to_string(),
                student_ids: vec!["s9".to_string()],
            },
        ];
        t.store.preload(vec![student], classrooms, Vec::new());

        let users = t.store.users();
        let eve = users.iter().find(|u| u.id == "s9").unwrap();

        assert_eq!(eve.class_id.as_deref(), Some("cA"));
    }
}
