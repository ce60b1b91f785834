use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub max_score: u32,
    #[serde(default)]
    pub scoring_bands: Vec<ScoringBand>,
    #[serde(flatten)]
    pub kind: QuizKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizKind {
    Standard { questions: Vec<Question> },
    Triage { prompt: String, branches: Vec<TriageBranch> },
}

/// One triage option: picking it routes the session to the target quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageBranch {
    pub label: String,
    pub target_quiz_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

/// A single answer option. The position in the options list is the answer
/// index; `value` overrides index-based scoring when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AnswerOptionRepr")]
pub struct AnswerOption {
    pub label: String,
    #[serde(default)]
    pub value: Option<u32>,
}

/// Externally authored options may be bare label strings or full objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerOptionRepr {
    Label(String),
    Full { label: String, #[serde(default)] value: Option<u32> },
}

impl From<AnswerOptionRepr> for AnswerOption {
    fn from(repr: AnswerOptionRepr) -> Self {
        match repr {
            AnswerOptionRepr::Label(label) => Self { label, value: None },
            AnswerOptionRepr::Full { label, value } => Self { label, value },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringBand {
    pub severity: String,
    pub min: u32,
    pub max: u32,
    pub label: String,
    pub interpretation: String,
}

impl QuizDefinition {
    pub fn is_triage(&self) -> bool {
        matches!(self.kind, QuizKind::Triage { .. })
    }

    /// Questions of a standard quiz; empty for triage quizzes, whose single
    /// routing question is synthesized by the engine.
    pub fn questions(&self) -> &[Question] {
        match &self.kind {
            QuizKind::Standard { questions } => questions,
            QuizKind::Triage { .. } => &[],
        }
    }

    pub fn question(&self, index: usize) -> Result<&Question> {
        self.questions().get(index).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "question {} of quiz '{}' ({} questions)",
                index,
                self.id,
                self.questions().len()
            ))
        })
    }

    pub fn options(&self, question_index: usize) -> Result<&[AnswerOption]> {
        Ok(&self.question(question_index)?.options)
    }

    pub fn band_for(&self, score: u32) -> Option<&ScoringBand> {
        self.scoring_bands.iter().find(|b| b.contains(score))
    }
}

impl AnswerOption {
    /// Raw text inside a trailing parenthesized suffix, e.g. "4" in "Yes (4)".
    pub fn label_suffix(&self) -> Option<&str> {
        let inner = self.label.trim_end().strip_suffix(')')?;
        let open = inner.rfind('(')?;
        Some(&inner[open + 1..])
    }

    /// Point value encoded in the label as a trailing "(N)" suffix.
    pub fn label_value(&self) -> Option<u32> {
        self.label_suffix()?.trim().parse().ok()
    }

    /// Point value for scoring: explicit authored value, else the legacy
    /// label suffix, else the option's position in its list.
    pub fn point_value(&self, index: usize) -> u32 {
        self.value
            .or_else(|| self.label_value())
            .unwrap_or(index as u32)
    }
}

impl ScoringBand {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min && score <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(label: &str) -> AnswerOption {
        AnswerOption { label: label.to_string(), value: None }
    }

    #[test]
    fn label_value_parses_trailing_suffix() {
        assert_eq!(opt("Yes (4)").label_value(), Some(4));
        assert_eq!(opt("Severe problem (20)  ").label_value(), Some(20));
        assert_eq!(opt("No problem").label_value(), None);
        assert_eq!(opt("More than 10 (ten)").label_value(), None);
    }

    #[test]
    fn point_value_prefers_explicit_value_over_label_and_index() {
        let explicit = AnswerOption { label: "Sometimes (2)".into(), value: Some(3) };
        assert_eq!(explicit.point_value(1), 3);
        assert_eq!(opt("Sometimes (2)").point_value(1), 2);
        assert_eq!(opt("Sometimes").point_value(1), 1);
    }

    #[test]
    fn answer_option_deserializes_from_bare_string_or_object() {
        let bare: AnswerOption = serde_json::from_str(r#""Mild""#).unwrap();
        assert_eq!(bare.label, "Mild");
        assert_eq!(bare.value, None);

        let full: AnswerOption =
            serde_json::from_str(r#"{"label": "Yes", "value": 4}"#).unwrap();
        assert_eq!(full.label, "Yes");
        assert_eq!(full.value, Some(4));
    }
}
