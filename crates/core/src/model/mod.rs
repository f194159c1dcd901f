mod answer;
mod ids;
mod question;
mod report;

pub use answer::AnswerRecord;
pub use ids::{AttemptId, QuestionId};
pub use question::{AnswerKey, Question, QuestionError, QuestionKind};
pub use report::{BreakdownTally, QuizReport, ReportError};
