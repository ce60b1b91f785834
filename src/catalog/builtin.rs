use crate::error::{Error, Result};
use crate::models::quiz::{
    AnswerOption, Question, QuizDefinition, QuizKind, ScoringBand, TriageBranch,
};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::Catalog;

/// The static registry of standard clinical assessments. Band boundaries are
/// authoritative authored data taken from each instrument's documentation.
pub struct BuiltinCatalog {
    quizzes: HashMap<String, QuizDefinition>,
}

static BUILTIN: OnceLock<BuiltinCatalog> = OnceLock::new();

pub fn builtin() -> &'static BuiltinCatalog {
    BUILTIN.get_or_init(BuiltinCatalog::build)
}

impl Catalog for BuiltinCatalog {
    fn get_quiz(&self, id: &str) -> Result<&QuizDefinition> {
        self.quizzes
            .get(id)
            .ok_or_else(|| Error::UnknownQuiz(id.to_string()))
    }

    fn quiz_ids(&self) -> Vec<&str> {
        self.quizzes.keys().map(String::as_str).collect()
    }
}

impl BuiltinCatalog {
    fn build() -> Self {
        let mut quizzes = HashMap::new();
        for quiz in [
            nose(),
            snot12(),
            snot22(),
            tnss(),
            midas(),
            stop_bang(),
            epworth(),
            hhia(),
            dhi(),
            nose_snot(),
        ] {
            quizzes.insert(quiz.id.clone(), quiz);
        }
        Self { quizzes }
    }
}

fn band(severity: &str, min: u32, max: u32, interpretation: &str) -> ScoringBand {
    ScoringBand {
        severity: severity.to_string(),
        min,
        max,
        label: format!("{} ({}-{})", title_case(severity), min, max),
        interpretation: interpretation.to_string(),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn q(id: &str, text: &str, labels: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: labels
            .iter()
            .map(|l| AnswerOption { label: l.to_string(), value: None })
            .collect(),
    }
}

fn qv(id: &str, text: &str, options: &[(&str, u32)]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options
            .iter()
            .map(|(l, v)| AnswerOption { label: l.to_string(), value: Some(*v) })
            .collect(),
    }
}

const PROBLEM_0_4: [&str; 5] = [
    "No problem",
    "Very mild problem",
    "Moderate problem",
    "Fairly bad problem",
    "Severe problem",
];

const PROBLEM_0_5: [&str; 6] = [
    "No problem",
    "Very mild problem",
    "Mild problem",
    "Moderate problem",
    "Severe problem",
    "Problem as bad as it can be",
];

const DOZE_0_3: [&str; 4] = [
    "Would never doze",
    "Slight chance of dozing",
    "Moderate chance of dozing",
    "High chance of dozing",
];

const YES_SOMETIMES_NO: [(&str, u32); 3] = [("Yes (4)", 4), ("Sometimes (2)", 2), ("No (0)", 0)];

fn nose() -> QuizDefinition {
    QuizDefinition {
        id: "NOSE".into(),
        title: "NOSE - Nasal Obstruction Symptom Evaluation".into(),
        description: "Rates how much of a problem each nasal symptom has been over the past month."
            .into(),
        max_score: 100,
        scoring_bands: vec![
            band("normal", 0, 25, "Nasal breathing is within the normal range."),
            band("mild", 26, 50, "Mild nasal obstruction that may benefit from evaluation."),
            band("moderate", 51, 75, "Moderate nasal obstruction; an ENT consultation is recommended."),
            band("severe", 76, 100, "Severe nasal obstruction; please schedule an evaluation promptly."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                q("congestion", "Nasal congestion or stuffiness", &PROBLEM_0_4),
                q("blockage", "Nasal blockage or obstruction", &PROBLEM_0_4),
                q("breathing", "Trouble breathing through my nose", &PROBLEM_0_4),
                q("sleeping", "Trouble sleeping", &PROBLEM_0_4),
                q(
                    "exertion",
                    "Unable to get enough air through my nose during exercise or exertion",
                    &PROBLEM_0_4,
                ),
            ],
        },
    }
}

fn snot12() -> QuizDefinition {
    QuizDefinition {
        id: "SNOT12".into(),
        title: "SNOT-12 - Sino-Nasal Outcome Test".into(),
        description: "Rates the severity of sino-nasal symptoms over the past two weeks.".into(),
        max_score: 60,
        scoring_bands: vec![
            band("normal", 0, 11, "Sino-nasal symptoms are within the normal range."),
            band("mild", 12, 23, "Mild sino-nasal symptom burden."),
            band("moderate", 24, 41, "Moderate symptom burden; an ENT evaluation may help."),
            band("severe", 42, 60, "Severe symptom burden; please schedule an evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: snot_items(&SNOT12_ITEMS),
        },
    }
}

fn snot22() -> QuizDefinition {
    QuizDefinition {
        id: "SNOT22".into(),
        title: "SNOT-22 - Sino-Nasal Outcome Test".into(),
        description: "The full 22-item sino-nasal outcome test.".into(),
        max_score: 110,
        scoring_bands: vec![
            band("mild", 0, 20, "Mild impact of sino-nasal symptoms."),
            band("moderate", 21, 50, "Moderate impact; an ENT evaluation may help."),
            band("severe", 51, 110, "Severe impact; please schedule an evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: SNOT12_ITEMS
                .iter()
                .chain(SNOT22_EXTRA_ITEMS.iter())
                .map(|(id, text)| q(id, text, &PROBLEM_0_5))
                .collect(),
        },
    }
}

const SNOT12_ITEMS: [(&str, &str); 12] = [
    ("blow_nose", "Need to blow nose"),
    ("sneezing", "Sneezing"),
    ("runny_nose", "Runny nose"),
    ("obstruction", "Nasal obstruction"),
    ("smell_taste", "Loss of smell or taste"),
    ("cough", "Cough"),
    ("post_nasal", "Post-nasal discharge"),
    ("thick_discharge", "Thick nasal discharge"),
    ("ear_fullness", "Ear fullness"),
    ("dizziness", "Dizziness"),
    ("facial_pain", "Facial pain or pressure"),
    ("fall_asleep", "Difficulty falling asleep"),
];

const SNOT22_EXTRA_ITEMS: [(&str, &str); 10] = [
    ("ear_pain", "Ear pain"),
    ("concentration", "Reduced concentration"),
    ("productivity", "Reduced productivity"),
    ("fatigue", "Fatigue"),
    ("wake_night", "Waking up at night"),
    ("poor_sleep", "Lack of a good night's sleep"),
    ("wake_tired", "Waking up tired"),
    ("irritable", "Feeling frustrated, restless, or irritable"),
    ("sad", "Feeling sad"),
    ("embarrassed", "Feeling embarrassed"),
];

fn snot_items(items: &[(&str, &str)]) -> Vec<Question> {
    items
        .iter()
        .map(|(id, text)| q(id, text, &PROBLEM_0_5))
        .collect()
}

fn tnss() -> QuizDefinition {
    let severity_0_3 = ["None", "Mild", "Moderate", "Severe"];
    QuizDefinition {
        id: "TNSS".into(),
        title: "TNSS - Total Nasal Symptom Score".into(),
        description: "Rates the four cardinal nasal allergy symptoms.".into(),
        max_score: 12,
        scoring_bands: vec![
            band("mild", 0, 4, "Mild nasal allergy symptoms."),
            band("moderate", 5, 8, "Moderate symptoms; allergy evaluation may help."),
            band("severe", 9, 12, "Severe symptoms; please schedule an allergy evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                q("congestion", "Nasal congestion", &severity_0_3),
                q("rhinorrhea", "Runny nose", &severity_0_3),
                q("sneezing", "Sneezing", &severity_0_3),
                q("itching", "Nasal itching", &severity_0_3),
            ],
        },
    }
}

const MIDAS_DAYS: [(&str, u32); 5] = [
    ("None (0)", 0),
    ("1 to 2 days (2)", 2),
    ("3 to 5 days (5)", 5),
    ("6 to 10 days (9)", 9),
    ("More than 10 days (15)", 15),
];

fn midas() -> QuizDefinition {
    QuizDefinition {
        id: "MIDAS".into(),
        title: "MIDAS - Migraine Disability Assessment".into(),
        description: "Counts days of activity lost to headache over the last three months.".into(),
        max_score: 75,
        scoring_bands: vec![
            band("little or no disability", 0, 5, "Headaches cause little or no disability."),
            band("mild disability", 6, 10, "Mild disability from headaches."),
            band("moderate disability", 11, 20, "Moderate disability; a headache consultation is recommended."),
            band("severe disability", 21, 75, "Severe disability; please schedule a headache evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                qv("missed_work", "On how many days did you miss work or school because of your headaches?", &MIDAS_DAYS),
                qv("reduced_work", "On how many days was your productivity at work or school reduced by half or more?", &MIDAS_DAYS),
                qv("missed_household", "On how many days did you not do household work because of your headaches?", &MIDAS_DAYS),
                qv("reduced_household", "On how many days was your household productivity reduced by half or more?", &MIDAS_DAYS),
                qv("missed_social", "On how many days did you miss family, social, or leisure activities?", &MIDAS_DAYS),
            ],
        },
    }
}

fn stop_bang() -> QuizDefinition {
    let yes_no = ["No", "Yes"];
    QuizDefinition {
        id: "STOPBANG".into(),
        title: "STOP-Bang - Sleep Apnea Risk".into(),
        description: "Screens for obstructive sleep apnea risk.".into(),
        max_score: 8,
        scoring_bands: vec![
            band("low risk", 0, 2, "Low risk of obstructive sleep apnea."),
            band("intermediate risk", 3, 4, "Intermediate risk; a sleep consultation may help."),
            band("high risk", 5, 6, "High risk; a sleep study is recommended."),
            band("very high risk", 7, 8, "Very high risk; please schedule a sleep evaluation promptly."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                q("snoring", "Do you snore loudly, louder than talking or loud enough to be heard through closed doors?", &yes_no),
                q("tired", "Do you often feel tired, fatigued, or sleepy during the daytime?", &yes_no),
                q("observed", "Has anyone observed you stop breathing during your sleep?", &yes_no),
                q("pressure", "Do you have, or are you being treated for, high blood pressure?", &yes_no),
                q("bmi", "Is your body mass index greater than 35?", &yes_no),
                q("age", "Are you older than 50?", &yes_no),
                q("neck", "Is your neck circumference greater than 40 cm (15.75 inches)?", &yes_no),
                q("gender", "Are you male?", &yes_no),
            ],
        },
    }
}

fn epworth() -> QuizDefinition {
    QuizDefinition {
        id: "EPWORTH".into(),
        title: "Epworth Sleepiness Scale".into(),
        description: "Rates your chance of dozing in common daily situations.".into(),
        max_score: 24,
        scoring_bands: vec![
            band("normal", 0, 10, "Daytime sleepiness is within the normal range."),
            band("mild", 11, 12, "Mild excessive daytime sleepiness."),
            band("moderate", 13, 15, "Moderate excessive daytime sleepiness; a sleep consultation may help."),
            band("severe", 16, 24, "Severe excessive daytime sleepiness; please schedule a sleep evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                q("reading", "Sitting and reading", &DOZE_0_3),
                q("tv", "Watching television", &DOZE_0_3),
                q("public", "Sitting inactive in a public place", &DOZE_0_3),
                q("passenger", "As a passenger in a car for an hour without a break", &DOZE_0_3),
                q("lying_down", "Lying down to rest in the afternoon", &DOZE_0_3),
                q("talking", "Sitting and talking to someone", &DOZE_0_3),
                q("after_lunch", "Sitting quietly after lunch without alcohol", &DOZE_0_3),
                q("traffic", "In a car, while stopped for a few minutes in traffic", &DOZE_0_3),
            ],
        },
    }
}

fn hhia() -> QuizDefinition {
    QuizDefinition {
        id: "HHIA".into(),
        title: "HHIA - Hearing Handicap Inventory for Adults".into(),
        description: "Screens for the social and emotional impact of hearing loss.".into(),
        max_score: 40,
        scoring_bands: vec![
            band("no handicap", 0, 8, "No significant hearing handicap detected."),
            band("mild to moderate handicap", 9, 24, "Mild to moderate hearing handicap; a hearing test is recommended."),
            band("significant handicap", 25, 40, "Significant hearing handicap; please schedule a hearing evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                qv("embarrassed", "Does a hearing problem cause you to feel embarrassed when meeting new people?", &YES_SOMETIMES_NO),
                qv("frustrated", "Does a hearing problem cause you to feel frustrated when talking to members of your family?", &YES_SOMETIMES_NO),
                qv("whisper", "Do you have difficulty hearing when someone speaks in a whisper?", &YES_SOMETIMES_NO),
                qv("handicapped", "Do you feel handicapped by a hearing problem?", &YES_SOMETIMES_NO),
                qv("visiting", "Does a hearing problem cause you difficulty when visiting friends, relatives, or neighbors?", &YES_SOMETIMES_NO),
                qv("services", "Does a hearing problem cause you to attend religious services or meetings less often than you would like?", &YES_SOMETIMES_NO),
                qv("arguments", "Does a hearing problem cause you to have arguments with family members?", &YES_SOMETIMES_NO),
                qv("television", "Does a hearing problem cause you difficulty when listening to the television or radio?", &YES_SOMETIMES_NO),
                qv("limits", "Do you feel that any difficulty with your hearing limits or hampers your personal or social life?", &YES_SOMETIMES_NO),
                qv("restaurant", "Does a hearing problem cause you difficulty when in a restaurant with relatives or friends?", &YES_SOMETIMES_NO),
            ],
        },
    }
}

fn dhi() -> QuizDefinition {
    QuizDefinition {
        id: "DHI".into(),
        title: "DHI - Dizziness Handicap Inventory (Screening)".into(),
        description: "Screens for the impact of dizziness or unsteadiness on daily life.".into(),
        max_score: 40,
        scoring_bands: vec![
            band("mild", 0, 10, "Mild dizziness-related handicap."),
            band("moderate", 11, 22, "Moderate handicap; a balance evaluation may help."),
            band("severe", 23, 40, "Severe handicap; please schedule a balance evaluation."),
        ],
        kind: QuizKind::Standard {
            questions: vec![
                qv("looking_up", "Does looking up increase your problem?", &YES_SOMETIMES_NO),
                qv("frustrated", "Because of your problem, do you feel frustrated?", &YES_SOMETIMES_NO),
                qv("travel", "Because of your problem, do you restrict your travel for business or recreation?", &YES_SOMETIMES_NO),
                qv("supermarket", "Does walking down the aisle of a supermarket increase your problem?", &YES_SOMETIMES_NO),
                qv("bed", "Because of your problem, do you have difficulty getting into or out of bed?", &YES_SOMETIMES_NO),
                qv("social", "Does your problem significantly restrict your participation in social activities?", &YES_SOMETIMES_NO),
                qv("reading", "Because of your problem, do you have difficulty reading?", &YES_SOMETIMES_NO),
                qv("ambitious", "Does performing more ambitious activities like sports or dancing increase your problem?", &YES_SOMETIMES_NO),
                qv("alone", "Because of your problem, are you afraid to leave your home without having someone accompany you?", &YES_SOMETIMES_NO),
                qv("embarrassed", "Because of your problem, have you been embarrassed in front of others?", &YES_SOMETIMES_NO),
            ],
        },
    }
}

fn nose_snot() -> QuizDefinition {
    QuizDefinition {
        id: "NOSE_SNOT".into(),
        title: "Nasal & Sinus Symptom Check".into(),
        description: "A short triage question that routes to the right nasal assessment.".into(),
        max_score: 0,
        scoring_bands: Vec::new(),
        kind: QuizKind::Triage {
            prompt: "Which best describes your main concern?".into(),
            branches: vec![
                TriageBranch {
                    label: "Nasal blockage or difficulty breathing through my nose".into(),
                    target_quiz_id: "NOSE".into(),
                },
                TriageBranch {
                    label: "Sinus pressure, drainage, or facial pain".into(),
                    target_quiz_id: "SNOT12".into(),
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_holds_all_standard_quizzes() {
        let ids = [
            "NOSE", "SNOT12", "SNOT22", "TNSS", "MIDAS", "STOPBANG", "EPWORTH", "HHIA", "DHI",
            "NOSE_SNOT",
        ];
        for id in ids {
            assert!(builtin().get_quiz(id).is_ok(), "missing builtin quiz {}", id);
        }
        assert_eq!(builtin().quiz_ids().len(), ids.len());
    }

    #[test]
    fn builtin_definitions_pass_integrity_checks() {
        for id in builtin().quiz_ids() {
            let quiz = builtin().get_quiz(id).unwrap();
            let findings = super::super::check_quiz(quiz);
            assert!(findings.is_empty(), "{}: {:?}", id, findings);
        }
    }

    #[test]
    fn snot22_has_twenty_two_questions() {
        let quiz = builtin().get_quiz("SNOT22").unwrap();
        assert_eq!(quiz.questions().len(), 22);
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!(matches!(
            builtin().get_quiz("FAKE123"),
            Err(Error::UnknownQuiz(_))
        ));
    }
}
