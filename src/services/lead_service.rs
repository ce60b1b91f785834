use crate::engine::AssessmentEngine;
use crate::error::{Error, Result};
use crate::models::lead::{ContactInfo, Lead, LeadStatus};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Destination for captured leads: the clinic dashboard, a CRM webhook,
/// whatever the surrounding system wires in. Opaque to this crate.
#[cfg_attr(test, mockall::automock)]
pub trait LeadSink: Send + Sync {
    fn submit(&self, lead: &Lead) -> anyhow::Result<()>;
}

pub struct LeadService<S: LeadSink> {
    sink: S,
}

impl<S: LeadSink> LeadService<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Record a partial submission for funnel analytics. Valid only after
    /// the first real answer and before completion.
    pub fn track_partial(
        &self,
        engine: &AssessmentEngine<'_>,
        contact: Option<ContactInfo>,
    ) -> Result<Lead> {
        if engine.is_completed() {
            return Err(Error::InvalidState(
                "assessment is already completed; submit the lead instead".to_string(),
            ));
        }
        if engine.answers().is_empty() {
            return Err(Error::InvalidState(
                "partial submission requires at least one answer".to_string(),
            ));
        }
        if let Some(contact) = &contact {
            contact.validate()?;
        }

        let lead = Lead {
            id: Uuid::new_v4(),
            session_id: engine.session_id(),
            quiz_id: engine.active_quiz().id.clone(),
            contact,
            result: None,
            status: LeadStatus::Partial,
            answers: engine.answers().to_vec(),
            created_at: Utc::now(),
        };
        self.sink.submit(&lead)?;
        debug!(
            lead_id = %lead.id,
            quiz_id = %lead.quiz_id,
            answers = lead.answers.len(),
            "partial submission tracked"
        );
        Ok(lead)
    }

    /// Hand a completed assessment plus contact info to the lead sink.
    pub fn submit_lead(
        &self,
        engine: &AssessmentEngine<'_>,
        contact: ContactInfo,
    ) -> Result<Lead> {
        contact.validate()?;
        let result = engine.result()?.clone();

        let lead = Lead {
            id: Uuid::new_v4(),
            session_id: engine.session_id(),
            quiz_id: result.quiz_id.clone(),
            contact: Some(contact),
            result: Some(result),
            status: LeadStatus::New,
            answers: engine.answers().to_vec(),
            created_at: Utc::now(),
        };
        self.sink.submit(&lead)?;
        info!(
            lead_id = %lead.id,
            quiz_id = %lead.quiz_id,
            severity = %lead.result.as_ref().map(|r| r.severity.as_str()).unwrap_or(""),
            "lead submitted"
        );
        Ok(lead)
    }
}
