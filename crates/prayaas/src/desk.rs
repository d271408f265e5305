use std::path::PathBuf;

use prayaas_core::conversation::Message;
use prayaas_core::{
    ConversationSession, ConversationSessionBuilder, DiagnosisWorkflow,
    DiagnosisWorkflowBuilder, DirectoryReportStore,
};
use prayaas_http_service::{
    HttpAssistantService, HttpDiagnosisService, HttpServiceConfig,
};
use prayaas_service::{AssistantService, DiagnosisService};

/// A desk builder.
///
/// See [`Desk`].
pub struct DeskBuilder {
    session_builder: ConversationSessionBuilder,
    workflow_builder: DiagnosisWorkflowBuilder,
}

impl DeskBuilder {
    /// Creates a desk builder talking to the HTTP backends described by
    /// `config`.
    pub fn with_http_config(config: HttpServiceConfig) -> Self {
        debug!(
            "assistant at {}, diagnosis at {}",
            config.assistant_base_url(),
            config.diagnosis_base_url()
        );
        Self::with_services(
            HttpAssistantService::new(config.clone()),
            HttpDiagnosisService::new(config),
        )
    }

    /// Creates a desk builder with arbitrary service implementations.
    pub fn with_services<A, D>(assistant: A, diagnosis: D) -> Self
    where
        A: AssistantService + 'static,
        D: DiagnosisService + 'static,
    {
        Self {
            session_builder:
                ConversationSessionBuilder::with_assistant_service(assistant),
            workflow_builder:
                DiagnosisWorkflowBuilder::with_diagnosis_service(diagnosis),
        }
    }

    /// Sets the directory downloaded reports are saved into.
    #[inline]
    pub fn with_report_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.workflow_builder = self
            .workflow_builder
            .with_report_store(DirectoryReportStore::new(dir));
        self
    }

    /// Attaches a callback to be invoked with the newest message after
    /// every transcript change.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.session_builder = self.session_builder.on_transcript(on_transcript);
        self
    }

    /// Builds a new desk.
    pub fn build(self) -> Desk {
        Desk {
            session: self.session_builder.build(),
            workflow: self.workflow_builder.build(),
        }
    }
}

/// The interactive surface: a conversation session and a diagnosis
/// workflow living side by side.
///
/// The two share nothing, so a pending reply never blocks an upload and
/// the other way around.
#[derive(Debug)]
pub struct Desk {
    session: ConversationSession,
    workflow: DiagnosisWorkflow,
}

impl Desk {
    /// Returns the conversation session.
    #[inline]
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Returns the conversation session for driving it.
    #[inline]
    pub fn session_mut(&mut self) -> &mut ConversationSession {
        &mut self.session
    }

    /// Returns the diagnosis workflow.
    #[inline]
    pub fn workflow(&self) -> &DiagnosisWorkflow {
        &self.workflow
    }

    /// Returns the diagnosis workflow for driving it.
    #[inline]
    pub fn workflow_mut(&mut self) -> &mut DiagnosisWorkflow {
        &mut self.workflow
    }

    /// Returns `true` if either subsystem waits on the network.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.session.is_awaiting_reply() || self.workflow.is_artifact_pending()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use prayaas_service::Artifact;
    use prayaas_test_service::{TestAssistantService, TestDiagnosisService};

    use super::*;

    #[tokio::test]
    async fn test_desk_composes_both_subsystems() {
        let mut assistant = TestAssistantService::default();
        assistant.add_reply("hi there");
        let mut diagnosis = TestDiagnosisService::default();
        diagnosis.add_diagnosis("Diagnosis: mild anemia");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut desk = DeskBuilder::with_services(assistant, diagnosis)
            .on_transcript({
                let seen = Arc::clone(&seen);
                move |msg| seen.lock().unwrap().push(msg.text().to_owned())
            })
            .build();
        assert!(!desk.is_busy());

        let reply = desk.session_mut().submit("hello").unwrap();
        assert!(desk.is_busy());
        let artifact =
            Artifact::new("report.txt", "Hb 9.8 g/dL".as_bytes()).unwrap();
        assert!(desk.workflow_mut().upload_and_wait(artifact).await);
        assert!(desk.is_busy());

        desk.session_mut().settle(reply.await);
        assert!(!desk.is_busy());
        assert_eq!(*seen.lock().unwrap(), ["hello", "hi there"]);
        assert_eq!(
            desk.workflow().diagnosis_result().text(),
            Some("Diagnosis: mild anemia")
        );
        assert_eq!(desk.session().transcript().len(), 2);
    }
}
