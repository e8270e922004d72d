//! Connector contract between the host translation workflow and a vendor.
//!
//! The host owns dispatch: it creates a [`SendJobContext`] per outbound job
//! and a [`SyncContext`] per sync cycle, and calls the operations of
//! [`TranslationConnector`] in order:
//!
//! ```text
//! send job:   process_start_project → process_send_translation* → on_end_send_translation_job
//!             (on_send_translation_error when a send fails)
//! sync cycle: get_raw_messages → (extract_sync_event_messages → acknowledge_message)*
//!             → on_end_sync_translation_job
//! ```

mod context;
mod project_director;

pub use context::{SendJobContext, Session, SessionSlot, SyncContext};
pub use project_director::{
    submission_name, ProjectDirectorConnector, COMPLETED_TARGETS_PAGE_SIZE, CONNECTOR_NAME,
};

use async_trait::async_trait;

use crate::events::{
    CompleteProjectEvent, ProcessOutcome, SendTranslationEvent, StartProjectEvent,
    SyncEventMessage,
};
use crate::types::{ConfigMap, Error, Result};
use crate::vendor::Target;

/// Operations a translation connector offers the host.
#[async_trait]
pub trait TranslationConnector: Send + Sync {
    /// Build the connector from host configuration. Fails on missing
    /// required options; no event is processed before this succeeds.
    fn initialize(config: &ConfigMap) -> Result<Self>
    where
        Self: Sized;

    fn name(&self) -> &str;

    async fn process_start_project(
        &self,
        event: StartProjectEvent,
        ctx: &mut SendJobContext,
    ) -> Result<ProcessOutcome>;

    async fn process_send_translation(
        &self,
        event: &SendTranslationEvent,
        ctx: &mut SendJobContext,
    ) -> Result<ProcessOutcome>;

    /// Called when a send fails. Returning `true` marks the error handled.
    fn on_send_translation_error(
        &self,
        err: &Error,
        event: &SendTranslationEvent,
        ctx: &SendJobContext,
    ) -> bool;

    async fn on_end_send_translation_job(&self, ctx: &mut SendJobContext) -> Result<()>;

    async fn process_complete_project(&self, event: &CompleteProjectEvent) -> Result<bool>;

    async fn get_raw_messages(&self, ctx: &mut SyncContext) -> Result<Vec<Target>>;

    async fn extract_sync_event_messages(
        &self,
        raw: &Target,
        ctx: &mut SyncContext,
    ) -> Result<Vec<SyncEventMessage>>;

    async fn acknowledge_message(&self, raw: &Target, ctx: &mut SyncContext) -> Result<bool>;

    async fn on_end_sync_translation_job(&self, ctx: &mut SyncContext) -> Result<()>;
}
