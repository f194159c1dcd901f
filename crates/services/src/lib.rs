#![forbid(unsafe_code)]

pub mod error;
pub mod fallback;
pub mod session;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use session::{
    QuizExport, QuizOutcome, QuizService, QuizSession, SessionProgress, SessionSnapshot,
    SubmissionOutcome, ValidationPath,
};
