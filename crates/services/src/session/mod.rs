mod export;
mod progress;
mod state;
mod stats;
mod validate;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::QuizError;
pub use export::{ExportedAnswer, QuizExport};
pub use progress::SessionProgress;
pub use state::QuizSession;
pub use stats::{SessionSnapshot, category_breakdown, difficulty_breakdown, snapshot};
pub use validate::ValidationPath;
pub use workflow::{DEFAULT_SESSION_SIZE, QuizOutcome, QuizService, SubmissionOutcome};
