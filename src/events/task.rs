//! Task events dispatched by the host translation workflow.
//!
//! Outbound jobs see one [`StartProjectEvent`], any number of
//! [`SendTranslationEvent`]s and eventually a [`CompleteProjectEvent`].
//! Sync cycles produce [`SyncEventMessage`]s for the host to review.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::vendor::Target;
use crate::xliff::XliffFile;

/// Host callback that records the durable external id of a project.
pub trait ProjectAcknowledger: Send + Sync + fmt::Debug {
    fn acknowledge(&self, external_project_id: &str);
}

/// A translation project was started on the host.
#[derive(Debug, Clone)]
pub struct StartProjectEvent {
    pub project_name: String,
    pub due_date: DateTime<Utc>,
    acknowledger: Arc<dyn ProjectAcknowledger>,
}

impl StartProjectEvent {
    pub fn new(
        project_name: impl Into<String>,
        due_date: DateTime<Utc>,
        acknowledger: Arc<dyn ProjectAcknowledger>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            due_date,
            acknowledger,
        }
    }

    /// Report the vendor's id for this project back to the host.
    pub fn acknowledge(&self, external_project_id: &str) {
        self.acknowledger.acknowledge(external_project_id);
    }
}

/// One content item to be sent for translation.
#[derive(Debug, Clone)]
pub struct SendTranslationEvent {
    /// Host id of the translation; also names the uploaded document.
    pub translation_id: String,

    /// Language the content is actually written in.
    pub source_language: String,

    pub target_language: String,

    /// Vendor submission ticket, when the host already knows one for the project.
    pub project_external_id: Option<String>,

    /// The content, as an XLIFF file with populated sources.
    pub content: XliffFile,
}

/// The host reports a project as complete.
#[derive(Debug, Clone, Default)]
pub struct CompleteProjectEvent {
    pub project_external_id: Option<String>,
}

/// What a processing call tells the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// The event is fully handled and needs no further tracking.
    pub handled: bool,

    /// Identifier produced by the call, if any.
    pub id: Option<String>,
}

impl ProcessOutcome {
    pub fn pending(id: Option<String>) -> Self {
        Self { handled: false, id }
    }
}

/// A completed translation ready for review on the host.
#[derive(Debug, Clone)]
pub struct ReviewTranslationEvent {
    pub file: XliffFile,
    pub target: Target,
}

/// Messages a sync cycle hands to the host.
#[derive(Debug, Clone)]
pub enum SyncEventMessage {
    ReviewTranslation(ReviewTranslationEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl ProjectAcknowledger for Recorder {
        fn acknowledge(&self, external_project_id: &str) {
            self.0.lock().unwrap().push(external_project_id.to_string());
        }
    }

    #[test]
    fn acknowledge_reaches_host_callback() {
        let recorder = Arc::new(Recorder::default());
        let event = StartProjectEvent::new("Acme Site", Utc::now(), recorder.clone());

        event.acknowledge("SUB-1");
        event.clone().acknowledge("SUB-2");

        assert_eq!(*recorder.0.lock().unwrap(), vec!["SUB-1", "SUB-2"]);
    }

    #[test]
    fn outcomes() {
        assert_eq!(
            ProcessOutcome::pending(Some("T1.xlf".to_string())),
            ProcessOutcome {
                handled: false,
                id: Some("T1.xlf".to_string())
            }
        );
        assert!(!ProcessOutcome::pending(None).handled);
    }
}
