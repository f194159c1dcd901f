#![forbid(unsafe_code)]

pub mod api;
pub mod http;
pub mod memory;

pub use api::{AnswerValidator, ProviderError, Providers, QuestionQuery, QuestionSource, RemoteVerdict};
pub use http::{HttpQuizApi, QuizApiConfig};
pub use memory::InMemoryProvider;
