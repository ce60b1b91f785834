use assessment_engine::{
    builtin, AssessmentEngine, ContactInfo, Lead, LeadService, LeadSink, LeadStatus,
};
use std::sync::Mutex;

/// In-memory stand-in for the clinic dashboard.
#[derive(Default)]
struct RecordingSink {
    leads: Mutex<Vec<Lead>>,
}

impl LeadSink for RecordingSink {
    fn submit(&self, lead: &Lead) -> anyhow::Result<()> {
        self.leads.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

fn contact() -> ContactInfo {
    ContactInfo {
        name: "Pat Doe".into(),
        email: "pat@example.com".into(),
        phone: Some("+1 555 0100".into()),
    }
}

#[test]
fn assessment_to_lead_capture_flow() {
    let service = LeadService::new(RecordingSink::default());

    let mut engine = AssessmentEngine::start(builtin(), "STOPBANG").unwrap();
    engine.answer(0, 1).unwrap();

    // Funnel record after the first answer, before completion.
    let partial = service.track_partial(&engine, None).unwrap();
    assert_eq!(partial.status, LeadStatus::Partial);
    assert_eq!(partial.session_id, engine.session_id());
    assert!(partial.result.is_none());

    for i in 1..8 {
        engine.answer(i, 1).unwrap();
    }

    let lead = service.submit_lead(&engine, contact()).unwrap();
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.quiz_id, "STOPBANG");
    let result = lead.result.as_ref().unwrap();
    assert_eq!(result.score, 8);
    assert_eq!(result.severity, "very high risk");
    assert_eq!(lead.answers.len(), 8);
}

#[test]
fn partial_after_completion_is_rejected() {
    let service = LeadService::new(RecordingSink::default());

    let mut engine = AssessmentEngine::start(builtin(), "TNSS").unwrap();
    for i in 0..4 {
        engine.answer(i, 3).unwrap();
    }

    assert!(service.track_partial(&engine, None).is_err());
    assert!(service.submit_lead(&engine, contact()).is_ok());
}

#[test]
fn sink_failures_propagate_to_the_caller() {
    struct FailingSink;
    impl LeadSink for FailingSink {
        fn submit(&self, _lead: &Lead) -> anyhow::Result<()> {
            anyhow::bail!("dashboard unavailable")
        }
    }

    let service = LeadService::new(FailingSink);
    let mut engine = AssessmentEngine::start(builtin(), "TNSS").unwrap();
    for i in 0..4 {
        engine.answer(i, 0).unwrap();
    }

    let err = service.submit_lead(&engine, contact()).unwrap_err();
    assert!(err.to_string().contains("dashboard unavailable"));
}
