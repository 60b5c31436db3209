mod classroom;
mod material;
mod problem;
mod student;
mod submission;
mod user;

pub use classroom::Classroom;
pub use material::TeachingMaterial;
pub use problem::Problem;
pub use student::Student;
pub use submission::{Submission, TypingPoint};
pub use user::{Role, User};
