use crate::error::{Error, Result};
use crate::models::answer::Answer;
use crate::models::quiz::QuizDefinition;
use crate::models::result::AssessmentResult;

pub struct ScoringService;

impl ScoringService {
    /// Score a complete, in-order answer set against a quiz definition.
    ///
    /// Pure over its inputs: the same `(quiz, answers)` always produces the
    /// same result. Each answer's point value is the option's explicit
    /// `value` when authored, else a trailing "(N)" label suffix, else the
    /// answer index itself.
    pub fn score(quiz: &QuizDefinition, answers: &[Answer]) -> Result<AssessmentResult> {
        let questions = quiz.questions();
        if answers.len() != questions.len() {
            return Err(Error::InvalidState(format!(
                "scoring quiz '{}' requires {} answers, got {}",
                quiz.id,
                questions.len(),
                answers.len()
            )));
        }

        let mut total: u32 = 0;
        for (expected_index, answer) in answers.iter().enumerate() {
            if answer.question_index != expected_index {
                return Err(Error::OutOfOrderAnswer {
                    expected: expected_index,
                    got: answer.question_index,
                });
            }
            let options = quiz.options(expected_index)?;
            let option = options.get(answer.answer_index).ok_or_else(|| {
                Error::IndexOutOfRange(format!(
                    "answer {} for question {} of quiz '{}' ({} options)",
                    answer.answer_index,
                    expected_index,
                    quiz.id,
                    options.len()
                ))
            })?;
            total += option.point_value(answer.answer_index);
        }

        // A score outside every band is a catalog data error, never a
        // default.
        let band = quiz.band_for(total).ok_or_else(|| {
            Error::ScoringInvariantViolation(format!(
                "score {} of quiz '{}' falls outside all scoring bands",
                total, quiz.id
            ))
        })?;

        Ok(AssessmentResult {
            quiz_id: quiz.id.clone(),
            score: total,
            max_score: quiz.max_score,
            severity: band.severity.clone(),
            interpretation: band.interpretation.clone(),
        })
    }
}
