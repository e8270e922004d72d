//! # Project Director connector
//!
//! Bridges a CMS translation workflow to the GlobalLink Project Director
//! SOAP API:
//! - Outbound: open a submission per project, upload one XLIFF document per
//!   content item, start the submission and report its ticket to the host
//! - Inbound: fetch completed targets, turn each into a review event, confirm
//!   the download once the host took it
//!
//! ## Architecture
//!
//! ```text
//!   host events →  ┌──────────────────────────────┐
//!                  │  ProjectDirectorConnector    │
//!                  │  (TranslationConnector)      │
//!                  │   ┌────────┐  ┌───────────┐  │
//!                  │   │ xliff  │  │ job state │  │
//!                  │   └────────┘  └───────────┘  │
//!                  └──────────────┬───────────────┘
//!                                 │ ProjectDirectorClient
//!                  ┌──────────────┴───────────────┐
//!                  │  SoapClient (reqwest)        │ → Project Director
//!                  └──────────────────────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod connector;
pub mod events;
pub mod types;
pub mod vendor;
pub mod workflow;
pub mod xliff;

// Internal utilities
pub mod observability;
pub mod validation;

pub use connector::{ProjectDirectorConnector, SendJobContext, SyncContext, TranslationConnector};
pub use types::{ConfigMap, ConnectorSettings, Error, Result};
