use assessment_engine::{
    builtin, AssessmentEngine, EngineState, Error, Progress,
};

#[test]
fn nose_flow_end_to_end() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE").expect("start NOSE");
    assert_eq!(engine.state(), EngineState::InProgress);
    assert_eq!(engine.current_question_index(), 0);

    let first = engine.current_question().expect("first question");
    assert_eq!(first.text, "Nasal congestion or stuffiness");
    assert_eq!(first.options.len(), 5);

    for i in 0..5 {
        assert_eq!(engine.current_question_index(), i);
        let progress = engine.answer(i, 2).expect("answer accepted");
        if i < 4 {
            assert_eq!(progress, Progress::Advanced { next_question: i + 1 });
        } else {
            assert_eq!(progress, Progress::Completed);
        }
    }

    assert!(engine.is_completed());
    let result = engine.result().expect("result");
    assert_eq!(result.quiz_id, "NOSE");
    assert_eq!(result.score, 10);
    // 10 falls inside the documented "Normal (0-25)" band.
    assert_eq!(result.severity, "normal");
    assert_eq!(result.max_score, 100);
    assert_eq!(engine.answers().len(), 5);
    assert_eq!(engine.answers()[2].answer_text, "Moderate problem");
}

#[test]
fn unknown_quiz_creates_no_session() {
    let err = AssessmentEngine::start(builtin(), "FAKE123").unwrap_err();
    assert!(matches!(err, Error::UnknownQuiz(_)));
}

#[test]
fn out_of_order_answers_leave_state_untouched() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE").unwrap();

    // Ahead of the current question.
    let err = engine.answer(3, 0).unwrap_err();
    assert!(matches!(err, Error::OutOfOrderAnswer { expected: 0, got: 3 }));
    assert!(engine.answers().is_empty());
    assert_eq!(engine.current_question_index(), 0);

    engine.answer(0, 1).unwrap();

    // Duplicate of an already answered question.
    let err = engine.answer(0, 4).unwrap_err();
    assert!(matches!(err, Error::OutOfOrderAnswer { expected: 1, got: 0 }));
    assert_eq!(engine.answers().len(), 1);
    assert_eq!(engine.answers()[0].answer_index, 1);
    assert_eq!(engine.current_question_index(), 1);
}

#[test]
fn stale_option_index_is_rejected_without_mutation() {
    let mut engine = AssessmentEngine::start(builtin(), "TNSS").unwrap();
    let err = engine.answer(0, 9).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange(_)));
    assert!(engine.answers().is_empty());
    assert_eq!(engine.state(), EngineState::InProgress);
}

#[test]
fn result_before_completion_is_invalid() {
    let mut engine = AssessmentEngine::start(builtin(), "TNSS").unwrap();
    assert!(matches!(engine.result(), Err(Error::InvalidState(_))));
    engine.answer(0, 0).unwrap();
    assert!(matches!(engine.result(), Err(Error::InvalidState(_))));
}

#[test]
fn completed_sessions_reject_further_calls() {
    let mut engine = AssessmentEngine::start(builtin(), "TNSS").unwrap();
    for i in 0..4 {
        engine.answer(i, 0).unwrap();
    }
    assert!(engine.is_completed());
    assert!(matches!(engine.current_question(), Err(Error::InvalidState(_))));
    assert!(matches!(engine.answer(4, 0), Err(Error::InvalidState(_))));

    // The result stays available and stable.
    let first = engine.result().unwrap().clone();
    assert_eq!(engine.result().unwrap(), &first);
}

#[test]
fn triage_option_zero_routes_to_nose() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE_SNOT").unwrap();
    assert_eq!(engine.state(), EngineState::Triage);
    let question = engine.current_question().unwrap();
    assert_eq!(question.text, "Which best describes your main concern?");
    assert_eq!(question.options.len(), 2);

    let progress = engine.answer(0, 0).unwrap();
    assert_eq!(progress, Progress::Triaged { selected_quiz_id: "NOSE".to_string() });
    assert_eq!(engine.active_quiz().id, "NOSE");
    assert_eq!(engine.state(), EngineState::InProgress);
    assert!(engine.answers().is_empty());
    assert_eq!(engine.current_question_index(), 0);
    assert!(engine.triage_choice().is_some());
}

#[test]
fn triage_option_one_routes_to_snot12() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE_SNOT").unwrap();
    let progress = engine.answer(0, 1).unwrap();
    assert_eq!(progress, Progress::Triaged { selected_quiz_id: "SNOT12".to_string() });
    assert_eq!(engine.active_quiz().id, "SNOT12");
    assert!(engine.answers().is_empty());
    assert_eq!(engine.current_question_index(), 0);
}

#[test]
fn triage_rejects_bad_indices() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE_SNOT").unwrap();

    let err = engine.answer(1, 0).unwrap_err();
    assert!(matches!(err, Error::OutOfOrderAnswer { expected: 0, got: 1 }));
    assert_eq!(engine.state(), EngineState::Triage);

    let err = engine.answer(0, 5).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange(_)));
    assert_eq!(engine.state(), EngineState::Triage);
    assert_eq!(engine.active_quiz().id, "NOSE_SNOT");
}

#[test]
fn triage_flow_completes_the_selected_sub_quiz() {
    let mut engine = AssessmentEngine::start(builtin(), "NOSE_SNOT").unwrap();
    engine.answer(0, 1).unwrap();

    let total = engine.active_quiz().questions().len();
    assert_eq!(total, 12);
    for i in 0..total {
        engine.answer(i, 5).unwrap();
    }

    let result = engine.result().unwrap();
    assert_eq!(result.quiz_id, "SNOT12");
    assert_eq!(result.score, 60);
    assert_eq!(result.severity, "severe");
}
