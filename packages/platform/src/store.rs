//! The domain store: single owner of every entity collection.
//!
//! All mutations are synchronous and atomic from the caller's point of
//! view. Operations that can fail validate first and only then apply,
//! so a returned error always means nothing changed.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::entity::{Classroom, Problem, Role, Student, Submission, TeachingMaterial, User};
use crate::error::{Result, StoreError};
use crate::models::{NewProblem, NewStudent, NewSubmission, ProblemPatch, StudentPatch};
use crate::session::CURRENT_USER_KEY;
use crate::storage::{KeyValueStore, MaterialVault, StorageError};

/// Id of the fixed teacher account present in every derived user list.
pub const TEACHER_ID: &str = "teacher-admin";
const TEACHER_NAME: &str = "Teacher";
const TEACHER_USERNAME: &str = "teacher";
const TEACHER_PASSWORD: &str = "admin";

fn teacher_account() -> User {
    User {
        id: TEACHER_ID.to_string(),
        name: TEACHER_NAME.to_string(),
        username: TEACHER_USERNAME.to_string(),
        password: Some(TEACHER_PASSWORD.to_string()),
        role: Role::Teacher,
        class_id: None,
        student_number: None,
    }
}

/// Build the authoritative user list: the fixed teacher account plus
/// one record per student, each tagged with the first classroom whose
/// membership contains it.
///
/// Deliberately recomputed on every read instead of cached, so student
/// and classroom mutations are reflected without a synchronization
/// step and the uniqueness checks always see current data.
pub fn derive_users(students: &[Student], classrooms: &[Classroom]) -> Vec<User> {
    let mut users = Vec::with_capacity(students.len() + 1);
    users.push(teacher_account());
    for student in students {
        let classroom = classrooms.iter().find(|c| c.contains(&student.id));
        users.push(User {
            id: student.id.clone(),
            name: student.name.clone(),
            username: student.username.clone(),
            password: Some(student.password.clone()),
            role: Role::Student,
            class_id: classroom.map(|c| c.id.clone()),
            student_number: student.student_number.clone(),
        });
    }
    users
}

fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Drop empty-string entries so "no student number" has one spelling.
fn normalize_number(number: Option<String>) -> Option<String> {
    number.filter(|n| !n.is_empty())
}

/// Single source of truth for users, students, classrooms, problems,
/// submissions and materials.
pub struct Store {
    students: Vec<Student>,
    classrooms: Vec<Classroom>,
    problems: Vec<Problem>,
    submissions: Vec<Submission>,
    materials: Vec<TeachingMaterial>,
    current_user: Option<User>,
    session: Arc<dyn KeyValueStore>,
    vault: MaterialVault,
}

impl Store {
    /// Create an empty store.
    ///
    /// `session` restores any logged-in user a previous run left under
    /// [`CURRENT_USER_KEY`]; `vault` holds the bytes of uploaded
    /// materials and is cleaned up when the store is dropped.
    pub fn new(session: Arc<dyn KeyValueStore>, vault: MaterialVault) -> Result<Self> {
        let current_user = match session.get(CURRENT_USER_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "discarding unreadable session user");
                    session.remove(CURRENT_USER_KEY)?;
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            students: Vec::new(),
            classrooms: Vec::new(),
            problems: Vec::new(),
            submissions: Vec::new(),
            materials: Vec::new(),
            current_user,
            session,
            vault,
        })
    }

    /// Replace the entity collections with prepared course data.
    /// Intended for seeding a fresh store.
    pub fn preload(
        &mut self,
        students: Vec<Student>,
        classrooms: Vec<Classroom>,
        problems: Vec<Problem>,
    ) {
        self.students = students;
        self.classrooms = classrooms;
        self.problems = problems;
    }

    // --- derived views ---------------------------------------------------

    /// The derived user list, recomputed on every call.
    pub fn users(&self) -> Vec<User> {
        derive_users(&self.students, &self.classrooms)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // --- reads -----------------------------------------------------------

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn materials(&self) -> &[TeachingMaterial] {
        &self.materials
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.classrooms.iter().find(|c| c.id == id)
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn submission(&self, id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    /// Students of a classroom, in membership order.
    pub fn students_in(&self, classroom_id: &str) -> Vec<&Student> {
        let Some(classroom) = self.classroom(classroom_id) else {
            return Vec::new();
        };
        classroom
            .student_ids
            .iter()
            .filter_map(|id| self.student(id))
            .collect()
    }

    /// All submissions for a problem, most recent first.
    pub fn submissions_for_problem(&self, problem_id: &str) -> Vec<&Submission> {
        let mut found: Vec<&Submission> = self
            .submissions
            .iter()
            .filter(|s| s.problem_id == problem_id)
            .collect();
        found.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        found
    }

    /// A student's most recent submission for a problem, used to
    /// prefill the editor on a revisit.
    pub fn latest_submission(&self, problem_id: &str, student_id: &str) -> Option<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.problem_id == problem_id && s.student_id == student_id)
            .max_by_key(|s| s.submitted_at)
    }

    // --- problems --------------------------------------------------------

    #[instrument(skip(self, data), fields(title = %data.title))]
    pub fn add_problem(&mut self, data: NewProblem) -> Problem {
        let problem = Problem {
            id: generate_id("p"),
            title: data.title,
            description: data.description,
            title_key: None,
            description_key: None,
            hint_key: None,
            hint: data.hint,
            initial_code: data.initial_code,
        };
        info!(problem_id = %problem.id, "problem created");
        self.problems.push(problem.clone());
        problem
    }

    /// Merge `patch` into an existing problem; silently does nothing
    /// for an unknown id.
    #[instrument(skip(self, patch), fields(problem_id = %problem_id))]
    pub fn update_problem(&mut self, problem_id: &str, patch: ProblemPatch) {
        let Some(problem) = self.problems.iter_mut().find(|p| p.id == problem_id) else {
            return;
        };
        if let Some(title) = patch.title {
            problem.title = title;
        }
        if let Some(description) = patch.description {
            problem.description = description;
        }
        if let Some(initial_code) = patch.initial_code {
            problem.initial_code = initial_code;
        }
        if let Some(hint) = patch.hint {
            problem.hint = Some(hint);
        }
        info!("problem updated");
    }

    // --- submissions -----------------------------------------------------

    /// Record a submission with a generated id and the current time.
    /// Referenced ids are not validated; the append always succeeds.
    #[instrument(
        skip(self, data),
        fields(problem_id = %data.problem_id, student_id = %data.student_id)
    )]
    pub fn add_submission(&mut self, data: NewSubmission) -> Submission {
        let submission = Submission {
            id: generate_id("sub"),
            problem_id: data.problem_id,
            student_id: data.student_id,
            class_id: data.class_id,
            final_code: data.final_code,
            typing_history: data.typing_history,
            submitted_at: Utc::now(),
        };
        info!(submission_id = %submission.id, "submission recorded");
        self.submissions.push(submission.clone());
        submission
    }

    // --- classrooms and students -------------------------------------------

    #[instrument(skip(self))]
    pub fn add_classroom(&mut self, name: &str) -> Classroom {
        let classroom = Classroom {
            id: generate_id("c"),
            name: name.to_string(),
            student_ids: Vec::new(),
        };
        info!(class_id = %classroom.id, "classroom created");
        self.classrooms.push(classroom.clone());
        classroom
    }

    /// Register one student and enroll them in `classroom_id`.
    ///
    /// Usernames are checked case-insensitively against the whole
    /// derived user list; student numbers, when supplied, must be
    /// unused. On error nothing is applied.
    #[instrument(skip(self, data), fields(username = %data.username, class_id = %classroom_id))]
    pub fn add_student_to_classroom(
        &mut self,
        data: NewStudent,
        classroom_id: &str,
    ) -> Result<Student> {
        let users = self.users();

        let wanted = data.username.to_lowercase();
        if users.iter().any(|u| u.username.to_lowercase() == wanted) {
            return Err(StoreError::UsernameExists(data.username));
        }
        let number = normalize_number(data.student_number);
        if let Some(n) = &number {
            if users.iter().any(|u| u.student_number.as_deref() == Some(n)) {
                return Err(StoreError::StudentNumberExists(n.clone()));
            }
        }

        let student = Student {
            id: generate_id("s"),
            name: data.name,
            username: data.username,
            password: data.password,
            student_number: number,
        };
        info!(student_id = %student.id, "student registered");
        self.students.push(student.clone());
        if let Some(classroom) = self.classrooms.iter_mut().find(|c| c.id == classroom_id) {
            classroom.student_ids.push(student.id.clone());
        }
        Ok(student)
    }

    /// Batch registration; all-or-nothing.
    ///
    /// Every entry is validated against the current derived user list
    /// and against the earlier entries of the same batch before any
    /// change is applied, so the first collision aborts the whole call
    /// with the store untouched. Returns the number of students added.
    #[instrument(skip(self, batch), fields(count = batch.len(), class_id = %classroom_id))]
    pub fn add_students_to_classroom(
        &mut self,
        batch: Vec<NewStudent>,
        classroom_id: &str,
    ) -> Result<usize> {
        let users = self.users();
        let mut seen_usernames: HashSet<String> =
            users.iter().map(|u| u.username.to_lowercase()).collect();
        let mut seen_numbers: HashSet<String> = users
            .iter()
            .filter_map(|u| u.student_number.clone())
            .collect();

        for entry in &batch {
            if !seen_usernames.insert(entry.username.to_lowercase()) {
                return Err(StoreError::BatchUsernameExists(entry.username.clone()));
            }
            if let Some(n) = entry.student_number.as_deref().filter(|n| !n.is_empty()) {
                if !seen_numbers.insert(n.to_string()) {
                    return Err(StoreError::BatchStudentNumberExists(n.to_string()));
                }
            }
        }

        let mut new_ids = Vec::with_capacity(batch.len());
        for entry in batch {
            let student = Student {
                id: generate_id("s"),
                name: entry.name,
                username: entry.username,
                password: entry.password,
                student_number: normalize_number(entry.student_number),
            };
            new_ids.push(student.id.clone());
            self.students.push(student);
        }
        if let Some(classroom) = self.classrooms.iter_mut().find(|c| c.id == classroom_id) {
            classroom.student_ids.extend(new_ids.iter().cloned());
        }
        info!(added = new_ids.len(), "students registered in batch");
        Ok(new_ids.len())
    }

    /// Merge `patch` into an existing student.
    ///
    /// A provided username or student number is validated against all
    /// *other* users first. An empty password keeps the current one;
    /// an empty student number clears it.
    #[instrument(skip(self, patch), fields(student_id = %student_id))]
    pub fn update_student(&mut self, student_id: &str, patch: StudentPatch) -> Result<()> {
        let users = self.users();

        if let Some(username) = patch.username.as_deref().filter(|u| !u.is_empty()) {
            let wanted = username.to_lowercase();
            if users
                .iter()
                .any(|u| u.username.to_lowercase() == wanted && u.id != student_id)
            {
                return Err(StoreError::UsernameTaken(username.to_string()));
            }
        }
        if let Some(number) = patch.student_number.as_deref().filter(|n| !n.is_empty()) {
            if users
                .iter()
                .any(|u| u.student_number.as_deref() == Some(number) && u.id != student_id)
            {
                return Err(StoreError::StudentNumberTaken(number.to_string()));
            }
        }

        if let Some(student) = self.students.iter_mut().find(|s| s.id == student_id) {
            if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
                student.name = name;
            }
            if let Some(username) = patch.username.filter(|u| !u.is_empty()) {
                student.username = username;
            }
            if let Some(password) = patch.password.filter(|p| !p.is_empty()) {
                student.password = password;
            }
            if let Some(number) = patch.student_number {
                student.student_number = normalize_number(Some(number));
            }
            info!("student updated");
        }
        Ok(())
    }

    // --- materials ---------------------------------------------------------

    /// Stage `bytes` in the vault and record the material.
    #[instrument(skip(self, description, bytes), fields(name = %name, size = bytes.len()))]
    pub fn add_material(
        &mut self,
        name: &str,
        description: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<TeachingMaterial> {
        let vault_key = self.vault.stage(bytes)?;
        let material = TeachingMaterial {
            id: generate_id("m"),
            name: name.to_string(),
            description: description.to_string(),
            file_name: file_name.to_string(),
            size_bytes: bytes.len() as u64,
            vault_key,
            uploaded_at: Utc::now(),
        };
        info!(material_id = %material.id, "material uploaded");
        self.materials.push(material.clone());
        Ok(material)
    }

    /// Remove a material and release its staged bytes exactly once.
    ///
    /// Returns `true` if the material existed; a repeat call for the
    /// same id is a no-op reporting `false`.
    #[instrument(skip(self), fields(material_id = %material_id))]
    pub fn delete_material(&mut self, material_id: &str) -> Result<bool> {
        let Some(index) = self.materials.iter().position(|m| m.id == material_id) else {
            return Ok(false);
        };
        let material = self.materials.remove(index);
        self.vault.release(&material.vault_key)?;
        info!("material deleted");
        Ok(true)
    }

    /// Read back the uploaded bytes of a material, or `None` for an
    /// unknown id.
    pub fn material_bytes(&self, material_id: &str) -> Result<Option<Vec<u8>>> {
        let Some(material) = self.materials.iter().find(|m| m.id == material_id) else {
            return Ok(None);
        };
        Ok(Some(self.vault.read(&material.vault_key)?))
    }

    // --- session -------------------------------------------------------------

    /// Case-insensitive username match plus exact password match
    /// against the derived user list. On success the sanitized user
    /// (password stripped) becomes the session user and is persisted;
    /// on failure nothing changes.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let wanted = username.to_lowercase();
        let users = self.users();
        let matched = users.iter().find(|u| u.username.to_lowercase() == wanted);

        match matched {
            Some(user) if user.password.as_deref() == Some(password) => {
                let sanitized = user.sanitized();
                let json = serde_json::to_string(&sanitized)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?;
                self.session.set(CURRENT_USER_KEY, &json)?;
                info!(user_id = %sanitized.id, role = %sanitized.role, "login succeeded");
                self.current_user = Some(sanitized.clone());
                Ok(sanitized)
            }
            _ => {
                info!("login rejected");
                Err(StoreError::InvalidCredentials)
            }
        }
    }

    /// Clear the session user unconditionally.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<()> {
        self.current_user = None;
        self.session.remove(CURRENT_USER_KEY)?;
        info!("logged out");
        Ok(())
    }
}
