//! Host lifecycle events and the values handed back to the host.

pub mod task;

pub use task::{
    CompleteProjectEvent, ProcessOutcome, ProjectAcknowledger, ReviewTranslationEvent,
    SendTranslationEvent, StartProjectEvent, SyncEventMessage,
};
