//! Per-job state the host passes into every connector call.
//!
//! One context covers one outbound send job or one sync cycle. Calls take it
//! by `&mut`, so a context is never shared between concurrent calls.

use std::fmt;

use crate::events::StartProjectEvent;
use crate::types::JobId;
use crate::vendor::ProjectDirectorClient;

/// A cached vendor session.
pub type Session = Box<dyn ProjectDirectorClient>;

/// Per-job state that can hold a cached vendor session.
pub trait SessionSlot {
    fn job_id(&self) -> &JobId;

    fn session_slot(&mut self) -> &mut Option<Session>;
}

/// State of one outbound send job.
pub struct SendJobContext {
    pub job_id: JobId,

    /// Session opened by start-project or by the first send.
    pub client: Option<Session>,

    /// At least one document went into the current submission.
    pub document_uploaded: bool,

    /// Start event waiting for the vendor's submission ticket.
    pub start_event: Option<StartProjectEvent>,
}

impl SendJobContext {
    pub fn new() -> Self {
        Self::with_job_id(JobId::new())
    }

    pub fn with_job_id(job_id: JobId) -> Self {
        Self {
            job_id,
            client: None,
            document_uploaded: false,
            start_event: None,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }
}

impl Default for SendJobContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSlot for SendJobContext {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    fn session_slot(&mut self) -> &mut Option<Session> {
        &mut self.client
    }
}

impl fmt::Debug for SendJobContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendJobContext")
            .field("job_id", &self.job_id)
            .field("client", &self.client.is_some())
            .field("document_uploaded", &self.document_uploaded)
            .field("start_event", &self.start_event)
            .finish()
    }
}

/// State of one inbound sync cycle.
pub struct SyncContext {
    pub job_id: JobId,
    pub client: Option<Session>,
}

impl SyncContext {
    pub fn new() -> Self {
        Self {
            job_id: JobId::new(),
            client: None,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }
}

impl Default for SyncContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSlot for SyncContext {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    fn session_slot(&mut self) -> &mut Option<Session> {
        &mut self.client
    }
}

impl fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncContext")
            .field("job_id", &self.job_id)
            .field("client", &self.client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contexts_are_empty() {
        let send = SendJobContext::new();
        assert!(!send.has_client());
        assert!(!send.document_uploaded);
        assert!(send.start_event.is_none());

        let sync = SyncContext::default();
        assert!(!sync.has_client());
        assert_ne!(send.job_id, sync.job_id);
    }

    #[test]
    fn debug_hides_session() {
        let rendered = format!("{:?}", SendJobContext::new());
        assert!(rendered.contains("client: false"));
    }
}
