//! Connector for the GlobalLink Project Director translation service.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::sync::Arc;

use super::{SendJobContext, Session, SessionSlot, SyncContext, TranslationConnector};
use crate::events::{
    CompleteProjectEvent, ProcessOutcome, ReviewTranslationEvent, SendTranslationEvent,
    StartProjectEvent, SyncEventMessage,
};
use crate::types::{ConfigMap, ConnectorSettings, Error, Result};
use crate::validation::validate_non_empty;
use crate::vendor::{ClientFactory, Document, SoapClientFactory, Submission, Target};
use crate::xliff::{self, XliffDocument};

/// Name reported to the host.
pub const CONNECTOR_NAME: &str = "ProjectDirector";

/// Completed targets requested per sync cycle. Only one page is read.
pub const COMPLETED_TARGETS_PAGE_SIZE: usize = 50;

// 12-hour clock hour, as submission names have always been stamped.
const SUBMISSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%I-%M";

/// Submission name: `<prefix><projectName>-UCF-<yyyy-mm-dd-hh-mm>`.
pub fn submission_name<Tz>(prefix: &str, project_name: &str, at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "{}{}-UCF-{}",
        prefix,
        project_name,
        at.format(SUBMISSION_TIMESTAMP_FORMAT)
    )
}

/// Bridges host translation jobs to Project Director submissions.
#[derive(Debug, Clone)]
pub struct ProjectDirectorConnector {
    settings: ConnectorSettings,
    factory: Arc<dyn ClientFactory>,
}

impl ProjectDirectorConnector {
    pub fn new(settings: ConnectorSettings, factory: Arc<dyn ClientFactory>) -> Self {
        Self { settings, factory }
    }

    /// Resolve `config` and use `factory` to open vendor sessions.
    pub fn initialize_with(config: &ConfigMap, factory: Arc<dyn ClientFactory>) -> Result<Self> {
        let settings = ConnectorSettings::from_map(config)?;
        tracing::info!(
            "connector_initialized: url={}, project={}, user_agent={}",
            settings.director.url,
            settings.project_short_code,
            settings.director.user_agent
        );
        Ok(Self::new(settings, factory))
    }

    pub fn settings(&self) -> &ConnectorSettings {
        &self.settings
    }

    /// The job's cached vendor session, opened on first use.
    pub fn session<'a, C: SessionSlot>(&self, ctx: &'a mut C) -> Result<&'a mut Session> {
        let job_id = ctx.job_id().clone();
        let slot = ctx.session_slot();
        if slot.is_none() {
            *slot = Some(self.factory.connect(&self.settings.director)?);
            tracing::debug!("session_opened: job={}", job_id);
        }
        slot.as_mut()
            .ok_or_else(|| Error::internal("vendor session missing after connect"))
    }
}

#[async_trait]
impl TranslationConnector for ProjectDirectorConnector {
    fn initialize(config: &ConfigMap) -> Result<Self> {
        Self::initialize_with(config, Arc::new(SoapClientFactory::default()))
    }

    fn name(&self) -> &str {
        CONNECTOR_NAME
    }

    #[tracing::instrument(skip_all, fields(job = %ctx.job_id, project = %event.project_name))]
    async fn process_start_project(
        &self,
        event: StartProjectEvent,
        ctx: &mut SendJobContext,
    ) -> Result<ProcessOutcome> {
        let mut client = self.factory.connect(&self.settings.director)?;
        let project = client.get_project(&self.settings.project_short_code).await?;

        let submission = Submission {
            name: submission_name(self.settings.prefix(), &event.project_name, Local::now()),
            project,
            due_date: event.due_date,
        };
        tracing::info!("submission_initializing: name={}", submission.name);
        client.init_submission(submission).await?;

        ctx.client = Some(client);
        ctx.start_event = Some(event);

        // Acknowledged at job end, once the submission ticket exists.
        Ok(ProcessOutcome::pending(None))
    }

    #[tracing::instrument(skip_all, fields(job = %ctx.job_id, translation = %event.translation_id))]
    async fn process_send_translation(
        &self,
        event: &SendTranslationEvent,
        ctx: &mut SendJobContext,
    ) -> Result<ProcessOutcome> {
        validate_non_empty(&event.translation_id, "translation_id")?;

        let fresh = !ctx.has_client();
        let client = self.session(ctx)?;
        if fresh {
            if let Some(ticket) = event.project_external_id.as_deref().filter(|t| !t.is_empty()) {
                tracing::debug!("submission_reattaching: ticket={}", ticket);
                client.get_submission(ticket).await?;
            }
        }

        let mut file = event.content.clone();
        file.move_source_to_target();
        let data = xliff::to_bytes(&XliffDocument::single(file))?;

        let document = Document {
            name: xliff::document_name(&event.translation_id),
            file_format: self.settings.file_format.clone(),
            source_language: event.source_language.clone(),
            target_languages: vec![event.target_language.clone()],
            data,
        };
        let name = document.name.clone();
        client.upload_translatable(document).await?;

        ctx.document_uploaded = true;
        tracing::info!("document_uploaded: name={}", name);

        Ok(ProcessOutcome::pending(Some(name)))
    }

    fn on_send_translation_error(
        &self,
        err: &Error,
        event: &SendTranslationEvent,
        ctx: &SendJobContext,
    ) -> bool {
        tracing::warn!(
            "send_translation_failed: job={}, translation={}, error={}",
            ctx.job_id,
            event.translation_id,
            err
        );
        false
    }

    #[tracing::instrument(skip_all, fields(job = %ctx.job_id))]
    async fn on_end_send_translation_job(&self, ctx: &mut SendJobContext) -> Result<()> {
        // The session ends with the job whatever happens below.
        let Some(mut client) = ctx.client.take() else {
            return Ok(());
        };
        if !ctx.document_uploaded {
            tracing::debug!("send_job_ended: nothing uploaded");
            return Ok(());
        }

        let tickets = client.start_submission().await?;
        match (&ctx.start_event, tickets.first()) {
            (Some(event), Some(ticket)) => {
                event.acknowledge(ticket.as_str());
                tracing::info!("submission_started: ticket={}", ticket);
            }
            (Some(_), None) => {
                tracing::warn!("submission_started: vendor returned no ticket, project not acknowledged");
            }
            (None, _) => {
                tracing::info!("submission_started: no start event to acknowledge");
            }
        }
        Ok(())
    }

    async fn process_complete_project(&self, _event: &CompleteProjectEvent) -> Result<bool> {
        Ok(true)
    }

    #[tracing::instrument(skip_all, fields(job = %ctx.job_id))]
    async fn get_raw_messages(&self, ctx: &mut SyncContext) -> Result<Vec<Target>> {
        let client = self.session(ctx)?;
        let project = client.get_project(&self.settings.project_short_code).await?;
        let targets = client
            .get_completed_targets(&project, COMPLETED_TARGETS_PAGE_SIZE)
            .await?;

        tracing::info!("completed_targets_fetched: count={}", targets.len());
        Ok(targets)
    }

    #[tracing::instrument(skip_all, fields(job = %ctx.job_id, target = %raw.ticket))]
    async fn extract_sync_event_messages(
        &self,
        raw: &Target,
        ctx: &mut SyncContext,
    ) -> Result<Vec<SyncEventMessage>> {
        let client = self.session(ctx)?;
        let payload = client.download_target(&raw.ticket).await?;

        let file = xliff::from_bytes(&payload)?
            .into_first_file()
            .ok_or_else(|| Error::xliff(format!("target '{}' contains no file", raw.ticket)))?;

        Ok(vec![SyncEventMessage::ReviewTranslation(ReviewTranslationEvent {
            file,
            target: raw.clone(),
        })])
    }

    async fn acknowledge_message(&self, raw: &Target, ctx: &mut SyncContext) -> Result<bool> {
        let client = self.session(ctx)?;
        let answer = client.send_download_confirmation(&raw.ticket).await?;
        tracing::debug!("download_confirmed: target={}, answer={}", raw.ticket, answer);
        Ok(true)
    }

    async fn on_end_sync_translation_job(&self, ctx: &mut SyncContext) -> Result<()> {
        ctx.client = None;
        Ok(())
    }
}
