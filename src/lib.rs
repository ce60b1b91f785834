pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;

pub use catalog::{builtin, Catalog, RuntimeCatalog};
pub use engine::{AssessmentEngine, EngineState, Progress};
pub use error::{Error, Result};
pub use models::answer::Answer;
pub use models::lead::{ContactInfo, Lead, LeadStatus};
pub use models::quiz::{AnswerOption, Question, QuizDefinition, QuizKind, ScoringBand};
pub use models::result::AssessmentResult;
pub use services::lead_service::{LeadService, LeadSink};
pub use services::scoring_service::ScoringService;
