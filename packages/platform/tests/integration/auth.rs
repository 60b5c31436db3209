use platform::StoreError;
use platform::entity::Role;
use platform::session::{self, Access, CURRENT_USER_KEY};
use platform::storage::KeyValueStore;
use platform::store::TEACHER_ID;

use crate::common::TestStore;

mod login {
    use super::*;

    #[test]
    fn teacher_can_log_in_with_the_fixed_account() {
        let mut t = TestStore::seeded();

        let user = t.store.login("teacher", "admin").expect("Login failed");

        assert_eq!(user.id, TEACHER_ID);
        assert_eq!(user.role, Role::Teacher);
    }

    #[test]
    fn username_match_ignores_case() {
        let mut t = TestStore::seeded();

        let upper = t.store.login("Alice", "password123").expect("Login failed");
        t.store.logout().expect("Logout failed");
        let lower = t.store.login("alice", "password123").expect("Login failed");

        assert_eq!(upper, lower);
        assert_eq!(lower.role, Role::Student);
        assert_eq!(lower.class_id.as_deref(), Some("c1"));
    }

    #[test]
    fn password_match_is_exact() {
        let mut t = TestStore::seeded();

        let err = t.store.login("alice", "PASSWORD123").unwrap_err();

        assert!(matches!(err, StoreError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid username or password.");
    }

    #[test]
    fn unknown_usernames_are_rejected_without_touching_the_session() {
        let mut t = TestStore::seeded();

        let err = t.store.login("mallory", "password123").unwrap_err();

        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(t.store.current_user().is_none());
        assert_eq!(t.session.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[test]
    fn the_session_user_never_carries_a_password() {
        let mut t = TestStore::seeded();

        let user = t.store.login("alice", "password123").expect("Login failed");

        assert_eq!(user.password, None);
        let json = t
            .session
            .get(CURRENT_USER_KEY)
            .unwrap()
            .expect("Session entry missing after login");
        assert!(!json.contains("password123"), "Stored: {json}");
    }
}

mod persistence {
    use super::*;

    #[test]
    fn a_reopened_store_restores_the_logged_in_user() {
        let mut t = TestStore::seeded();
        t.store.login("alice", "password123").expect("Login failed");

        let reopened = t.reopen();

        let user = reopened.current_user().expect("Session user not restored");
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, None);
    }

    #[test]
    fn logout_clears_the_stored_session_user() {
        let mut t = TestStore::seeded();
        t.store.login("alice", "password123").expect("Login failed");

        t.store.logout().expect("Logout failed");

        assert!(t.store.current_user().is_none());
        assert_eq!(t.session.get(CURRENT_USER_KEY).unwrap(), None);
        assert!(t.reopen().current_user().is_none());
    }

    #[test]
    fn unreadable_session_data_is_discarded_on_open() {
        let t = TestStore::empty();
        t.session
            .set(CURRENT_USER_KEY, "not a user record")
            .unwrap();

        let reopened = t.reopen();

        assert!(reopened.current_user().is_none());
        assert_eq!(t.session.get(CURRENT_USER_KEY).unwrap(), None);
    }
}

mod role_gate {
    use super::*;

    #[test]
    fn anonymous_visitors_are_sent_to_the_login_page() {
        let access = session::authorize(None, &[Role::Teacher]);

        assert_eq!(access, Access::RedirectLogin);
    }

    #[test]
    fn a_logged_in_student_reaching_a_teacher_page_is_sent_home() {
        let mut t = TestStore::seeded();
        let user = t.store.login("alice", "password123").expect("Login failed");

        let access = session::authorize(Some(&user), &[Role::Teacher]);

        assert_eq!(access, Access::RedirectHome(Role::Student));
    }

    #[test]
    fn a_restored_session_user_passes_the_gate_for_their_role() {
        let mut t = TestStore::seeded();
        t.store.login("teacher", "admin").expect("Login failed");
        let reopened = t.reopen();

        let access = session::authorize(reopened.current_user(), &[Role::Teacher]);

        assert_eq!(access, Access::Granted);
    }
}
