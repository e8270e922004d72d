//! Host-side drivers for one outbound send job and one sync cycle.
//!
//! Hosts with their own dispatch call the [`TranslationConnector`]
//! operations directly; these drivers run the same sequence for hosts (and
//! tests) that just want a job executed end to end.

use crate::connector::{SendJobContext, SyncContext, TranslationConnector};
use crate::events::{SendTranslationEvent, StartProjectEvent, SyncEventMessage};
use crate::types::Result;

/// Receives review events produced by a sync cycle.
pub trait ReviewHandler {
    /// Returns `true` when the host took the message; only then is the
    /// vendor told the target was received.
    fn review(&mut self, message: SyncEventMessage) -> Result<bool>;
}

impl<F> ReviewHandler for F
where
    F: FnMut(SyncEventMessage) -> Result<bool>,
{
    fn review(&mut self, message: SyncEventMessage) -> Result<bool> {
        self(message)
    }
}

/// Result of one outbound send job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Provisional translation ids, one per successful send.
    pub translation_ids: Vec<String>,

    /// Sends that failed but were marked handled by the connector.
    pub handled_failures: usize,
}

/// Counters for one sync cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub reviewed: usize,
    pub acknowledged: usize,
}

/// Run one outbound job: start, every send, job end.
///
/// A send error the connector does not handle stops the job. Job end still
/// runs so the session is released, and the send error is returned.
pub async fn run_send_job<C>(
    connector: &C,
    start: Option<StartProjectEvent>,
    sends: &[SendTranslationEvent],
) -> Result<SendReport>
where
    C: TranslationConnector + ?Sized,
{
    let mut ctx = SendJobContext::new();
    let mut report = SendReport::default();

    tracing::info!(
        "send_job_started: connector={}, job={}, items={}",
        connector.name(),
        ctx.job_id,
        sends.len()
    );

    if let Some(event) = start {
        connector.process_start_project(event, &mut ctx).await?;
    }

    for event in sends {
        match connector.process_send_translation(event, &mut ctx).await {
            Ok(outcome) => report.translation_ids.extend(outcome.id),
            Err(err) if connector.on_send_translation_error(&err, event, &ctx) => {
                report.handled_failures += 1;
            }
            Err(err) => {
                if let Err(end_err) = connector.on_end_send_translation_job(&mut ctx).await {
                    tracing::warn!("send_job_end_failed: job={}, error={}", ctx.job_id, end_err);
                }
                return Err(err);
            }
        }
    }

    connector.on_end_send_translation_job(&mut ctx).await?;
    Ok(report)
}

/// Run one sync cycle: fetch completed work, hand every review event to
/// `reviewer`, confirm the targets the reviewer accepted.
pub async fn run_sync_cycle<C, R>(connector: &C, reviewer: &mut R) -> Result<SyncReport>
where
    C: TranslationConnector + ?Sized,
    R: ReviewHandler + ?Sized,
{
    let mut ctx = SyncContext::new();
    let outcome = sync_messages(connector, reviewer, &mut ctx).await;
    connector.on_end_sync_translation_job(&mut ctx).await?;

    let report = outcome?;
    tracing::info!(
        "sync_cycle_finished: job={}, fetched={}, reviewed={}, acknowledged={}",
        ctx.job_id,
        report.fetched,
        report.reviewed,
        report.acknowledged
    );
    Ok(report)
}

async fn sync_messages<C, R>(
    connector: &C,
    reviewer: &mut R,
    ctx: &mut SyncContext,
) -> Result<SyncReport>
where
    C: TranslationConnector + ?Sized,
    R: ReviewHandler + ?Sized,
{
    let raw_messages = connector.get_raw_messages(ctx).await?;
    let mut report = SyncReport {
        fetched: raw_messages.len(),
        ..SyncReport::default()
    };

    for raw in &raw_messages {
        let messages = connector.extract_sync_event_messages(raw, ctx).await?;

        let mut accepted = true;
        for message in messages {
            report.reviewed += 1;
            accepted &= reviewer.review(message)?;
        }

        if accepted && connector.acknowledge_message(raw, ctx).await? {
            report.acknowledged += 1;
        }
    }

    Ok(report)
}
