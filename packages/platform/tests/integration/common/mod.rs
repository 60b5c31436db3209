use std::sync::Arc;

use tempfile::TempDir;

use platform::Store;
use platform::models::NewStudent;
use platform::seed;
use platform::storage::{MaterialVault, MemoryStore};

/// Seeded entity ids, fixed by the demo course data.
pub mod ids {
    pub const ALICE: &str = "s1";
    pub const BOB: &str = "s2";
    pub const CHARLIE: &str = "s3";
    pub const PERIOD_1: &str = "c1";
    pub const PERIOD_3: &str = "c2";
    pub const HELLO_WORLD: &str = "p1";
    pub const SUM_TWO: &str = "p2";
}

/// A store over in-memory session storage and a material vault in a
/// temporary directory.
pub struct TestStore {
    pub store: Store,
    pub session: Arc<MemoryStore>,
    vault_dir: TempDir,
}

impl TestStore {
    /// Store with no course data at all.
    pub fn empty() -> Self {
        let session = Arc::new(MemoryStore::new());
        let vault_dir = TempDir::new().expect("Failed to create vault directory");
        let vault = MaterialVault::new(vault_dir.path().join("materials"))
            .expect("Failed to open material vault");
        let store = Store::new(session.clone(), vault).expect("Failed to create store");

        Self {
            store,
            session,
            vault_dir,
        }
    }

    /// Store preloaded with the demo course data: the fixed teacher
    /// account, students s1-s4, classrooms c1/c2 and the 32-problem
    /// catalog.
    pub fn seeded() -> Self {
        let mut harness = Self::empty();
        seed::apply(&mut harness.store);
        harness
    }

    /// A second store over the same session storage and vault
    /// directory, as a later process start would construct it.
    pub fn reopen(&self) -> Store {
        let vault = MaterialVault::new(self.vault_dir.path().join("materials"))
            .expect("Failed to reopen material vault");
        Store::new(self.session.clone(), vault).expect("Failed to reopen store")
    }
}

pub fn new_student(
    name: &str,
    username: &str,
    password: &str,
    student_number: Option<&str>,
) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        student_number: student_number.map(str::to_string),
    }
}
