mod problem;
mod student;
mod submission;

pub use problem::{NewProblem, ProblemPatch};
pub use student::{NewStudent, StudentPatch};
pub use submission::NewSubmission;
