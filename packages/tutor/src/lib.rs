pub mod client;
pub mod error;
pub mod prompts;

pub use client::{DEFAULT_MODEL, EXPLANATION_FALLBACK, FEEDBACK_FALLBACK, GeminiTutor, Tutor};
pub use error::TutorError;
pub use prompts::Language;
