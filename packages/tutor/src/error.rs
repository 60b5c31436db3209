use thiserror::Error;

/// Internal failure modes. The public [`Tutor`](crate::Tutor) methods
/// never surface these; they log and fall back to fixed texts.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Reply carried no text")]
    EmptyReply,
}
