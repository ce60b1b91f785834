use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::answer::Answer;
use crate::models::quiz::{Question, QuizDefinition, QuizKind};
use crate::models::result::AssessmentResult;
use crate::services::scoring_service::ScoringService;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// Per-session assessment walker.
///
/// A session owns a snapshot of its active quiz, so catalog updates never
/// shift questions under a live session. Sessions are independently owned
/// values driven by one caller; `&mut self` on [`answer`](Self::answer)
/// serializes calls per session.
pub struct AssessmentEngine<'c> {
    catalog: &'c dyn Catalog,
    session_id: Uuid,
    quiz: QuizDefinition,
    triage_question: Option<Question>,
    triage_choice: Option<Answer>,
    answers: Vec<Answer>,
    result: Option<AssessmentResult>,
    state: EngineState,
    started_at: DateTime<Utc>,
}

impl std::fmt::Debug for AssessmentEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentEngine")
            .field("session_id", &self.session_id)
            .field("quiz", &self.quiz)
            .field("triage_question", &self.triage_question)
            .field("triage_choice", &self.triage_choice)
            .field("answers", &self.answers)
            .field("result", &self.result)
            .field("state", &self.state)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting on the routing question of a triage quiz.
    Triage,
    InProgress,
    Completed,
}

/// What an accepted answer did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The triage answer selected a sub-assessment; the session restarts at
    /// question 0 of that quiz.
    Triaged { selected_quiz_id: String },
    Advanced { next_question: usize },
    Completed,
}

impl<'c> AssessmentEngine<'c> {
    /// Begin a session for the given quiz id. Fails with `UnknownQuiz` for
    /// ids absent from the catalog, leaving no session behind.
    pub fn start(catalog: &'c dyn Catalog, quiz_id: &str) -> Result<Self> {
        let quiz = catalog.get_quiz(quiz_id)?.clone();

        let (state, triage_question) = match &quiz.kind {
            QuizKind::Triage { prompt, branches } => {
                let question = Question {
                    id: format!("{}_triage", quiz.id.to_lowercase()),
                    text: prompt.clone(),
                    options: branches
                        .iter()
                        .map(|b| crate::models::quiz::AnswerOption {
                            label: b.label.clone(),
                            value: None,
                        })
                        .collect(),
                };
                (EngineState::Triage, Some(question))
            }
            QuizKind::Standard { questions } => {
                if questions.is_empty() {
                    return Err(Error::InvalidState(format!(
                        "quiz '{}' has no questions",
                        quiz.id
                    )));
                }
                (EngineState::InProgress, None)
            }
        };

        let session_id = Uuid::new_v4();
        debug!(%session_id, quiz_id = %quiz.id, ?state, "assessment session started");

        Ok(Self {
            catalog,
            session_id,
            quiz,
            triage_question,
            triage_choice: None,
            answers: Vec::new(),
            result: None,
            state,
            started_at: Utc::now(),
        })
    }

    pub fn current_question(&self) -> Result<&Question> {
        match self.state {
            EngineState::Triage => Ok(self
                .triage_question
                .as_ref()
                .expect("triage state always has a triage question")),
            EngineState::InProgress => self.quiz.question(self.answers.len()),
            EngineState::Completed => Err(Error::InvalidState(
                "assessment is already completed".to_string(),
            )),
        }
    }

    /// Record the answer for the current question and advance.
    ///
    /// Rejections (`OutOfOrderAnswer`, `IndexOutOfRange`, `InvalidState`)
    /// leave the session untouched; the caller re-renders and retries.
    pub fn answer(&mut self, question_index: usize, answer_index: usize) -> Result<Progress> {
        match self.state {
            EngineState::Completed => Err(Error::InvalidState(
                "assessment is already completed".to_string(),
            )),
            EngineState::Triage => self.answer_triage(question_index, answer_index),
            EngineState::InProgress => self.answer_question(question_index, answer_index),
        }
    }

    fn answer_triage(&mut self, question_index: usize, answer_index: usize) -> Result<Progress> {
        if question_index != 0 {
            return Err(Error::OutOfOrderAnswer { expected: 0, got: question_index });
        }

        let QuizKind::Triage { branches, .. } = &self.quiz.kind else {
            return Err(Error::InvalidState(
                "triage state without a triage quiz".to_string(),
            ));
        };
        let branch = branches.get(answer_index).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "triage option {} of quiz '{}' ({} branches)",
                answer_index,
                self.quiz.id,
                branches.len()
            ))
        })?;

        let target = self.catalog.get_quiz(&branch.target_quiz_id)?.clone();
        if target.is_triage() {
            return Err(Error::InvalidState(format!(
                "triage branch target '{}' is itself a triage quiz",
                target.id
            )));
        }
        if target.questions().is_empty() {
            return Err(Error::InvalidState(format!(
                "quiz '{}' has no questions",
                target.id
            )));
        }

        // The one permitted mid-session swap: before any real question of
        // the sub-quiz has been answered.
        debug_assert!(self.answers.is_empty());
        self.triage_choice = Some(Answer {
            question_index: 0,
            answer_index,
            answer_text: branch.label.clone(),
            answered_at: Utc::now(),
        });
        let selected_quiz_id = target.id.clone();
        debug!(
            session_id = %self.session_id,
            from = %self.quiz.id,
            to = %selected_quiz_id,
            "triage selected sub-assessment"
        );
        self.quiz = target;
        self.state = EngineState::InProgress;

        Ok(Progress::Triaged { selected_quiz_id })
    }

    fn answer_question(&mut self, question_index: usize, answer_index: usize) -> Result<Progress> {
        let current = self.answers.len();
        if question_index != current {
            return Err(Error::OutOfOrderAnswer { expected: current, got: question_index });
        }

        let options = self.quiz.options(current)?;
        let option = options.get(answer_index).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "answer {} for question {} of quiz '{}' ({} options)",
                answer_index,
                current,
                self.quiz.id,
                options.len()
            ))
        })?;

        self.answers.push(Answer {
            question_index,
            answer_index,
            answer_text: option.label.clone(),
            answered_at: Utc::now(),
        });

        if self.answers.len() == self.quiz.questions().len() {
            let result = ScoringService::score(&self.quiz, &self.answers)?;
            debug!(
                session_id = %self.session_id,
                quiz_id = %self.quiz.id,
                score = result.score,
                severity = %result.severity,
                "assessment completed"
            );
            self.result = Some(result);
            self.state = EngineState::Completed;
            return Ok(Progress::Completed);
        }

        Ok(Progress::Advanced { next_question: self.answers.len() })
    }

    pub fn result(&self) -> Result<&AssessmentResult> {
        self.result.as_ref().ok_or_else(|| {
            Error::InvalidState("assessment is not completed yet".to_string())
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == EngineState::Completed
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn active_quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn triage_choice(&self) -> Option<&Answer> {
        self.triage_choice.as_ref()
    }

    pub fn current_question_index(&self) -> usize {
        self.answers.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
