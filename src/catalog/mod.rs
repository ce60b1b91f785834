use crate::error::{Error, Result};
use crate::models::quiz::{QuizDefinition, QuizKind};
use std::collections::HashMap;
use tracing::warn;

mod builtin;

pub use builtin::builtin;
pub use builtin::BuiltinCatalog;

/// Read-only quiz lookup. The engine never depends on where a definition
/// came from; clinics may author their own and register them at runtime.
pub trait Catalog {
    fn get_quiz(&self, id: &str) -> Result<&QuizDefinition>;
    fn quiz_ids(&self) -> Vec<&str>;
}

/// Mutable catalog for externally authored quiz definitions, optionally
/// layered on top of the builtin set.
#[derive(Debug, Clone, Default)]
pub struct RuntimeCatalog {
    quizzes: HashMap<String, QuizDefinition>,
}

impl RuntimeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime catalog pre-seeded with every builtin quiz. Registered
    /// definitions with the same id shadow the builtin ones.
    pub fn with_builtin() -> Self {
        let mut catalog = Self::new();
        for id in builtin().quiz_ids() {
            if let Ok(quiz) = builtin().get_quiz(id) {
                catalog.quizzes.insert(quiz.id.clone(), quiz.clone());
            }
        }
        catalog
    }

    /// Register a quiz definition. Data-integrity findings are logged as
    /// warnings and never block registration; a broken scoring table still
    /// fails loudly at scoring time.
    pub fn register(&mut self, quiz: QuizDefinition) {
        for finding in check_quiz(&quiz) {
            warn!(quiz_id = %quiz.id, "catalog integrity: {}", finding);
        }
        if let QuizKind::Triage { branches, .. } = &quiz.kind {
            for branch in branches {
                if !self.quizzes.contains_key(&branch.target_quiz_id) {
                    warn!(
                        quiz_id = %quiz.id,
                        target = %branch.target_quiz_id,
                        "catalog integrity: triage branch target not registered"
                    );
                }
            }
        }
        self.quizzes.insert(quiz.id.clone(), quiz);
    }

    /// Load a JSON array of quiz definitions, returning how many were
    /// registered.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let quizzes: Vec<QuizDefinition> = serde_json::from_str(json)?;
        let count = quizzes.len();
        for quiz in quizzes {
            self.register(quiz);
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

impl Catalog for RuntimeCatalog {
    fn get_quiz(&self, id: &str) -> Result<&QuizDefinition> {
        self.quizzes
            .get(id)
            .ok_or_else(|| Error::UnknownQuiz(id.to_string()))
    }

    fn quiz_ids(&self) -> Vec<&str> {
        self.quizzes.keys().map(String::as_str).collect()
    }
}

/// Structural checks applied when a definition enters a catalog.
pub fn check_quiz(quiz: &QuizDefinition) -> Vec<String> {
    let mut findings = Vec::new();

    match &quiz.kind {
        QuizKind::Standard { questions } => {
            if questions.is_empty() {
                findings.push("quiz has no questions".to_string());
            }
            for (qi, question) in questions.iter().enumerate() {
                if question.options.len() < 2 {
                    findings.push(format!(
                        "question {} ('{}') has fewer than two options",
                        qi, question.id
                    ));
                }
                for (oi, option) in question.options.iter().enumerate() {
                    if option.label_suffix().is_some() && option.label_value().is_none() {
                        findings.push(format!(
                            "question {} option {} has an unparseable label suffix: '{}'",
                            qi, oi, option.label
                        ));
                    }
                    if let (Some(value), Some(parsed)) = (option.value, option.label_value()) {
                        if value != parsed {
                            findings.push(format!(
                                "question {} option {} label suffix ({}) disagrees with explicit value ({})",
                                qi, oi, parsed, value
                            ));
                        }
                    }
                }
            }
            findings.extend(check_bands(quiz));
        }
        QuizKind::Triage { branches, .. } => {
            if branches.len() < 2 {
                findings.push("triage quiz has fewer than two branches".to_string());
            }
        }
    }

    findings
}

/// Bands must be contiguous, in ascending order, and cover [0, max_score].
fn check_bands(quiz: &QuizDefinition) -> Vec<String> {
    let mut findings = Vec::new();
    let bands = &quiz.scoring_bands;

    if bands.is_empty() {
        findings.push("quiz has no scoring bands".to_string());
        return findings;
    }

    let mut expected_min = 0u32;
    for band in bands {
        if band.min > band.max {
            findings.push(format!(
                "band '{}' has min {} greater than max {}",
                band.severity, band.min, band.max
            ));
        }
        if band.min != expected_min {
            findings.push(format!(
                "band '{}' starts at {}, expected {} (bands must be contiguous from 0)",
                band.severity, band.min, expected_min
            ));
        }
        expected_min = band.max.saturating_add(1);
    }
    if let Some(last) = bands.last() {
        if last.max != quiz.max_score {
            findings.push(format!(
                "last band '{}' ends at {}, expected max_score {}",
                last.severity, last.max, quiz.max_score
            ));
        }
    }

    findings
}
