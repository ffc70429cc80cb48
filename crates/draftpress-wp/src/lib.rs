//! WordPress REST publishing for draftpress.
//!
//! Everything outside the converter core lives here: credential
//! resolution, the REST client, the file→post-id mapping store, and the
//! publish orchestrator that wires them to `draftpress-blocks`.
//!
//! # Modules
//!
//! - [`credentials`]: env + dotenv credential resolution
//! - [`client`]: tags, categories, and posts over the REST API
//! - [`mapping`]: the `wordpress.json` upsert mapping
//! - [`publish`]: the create-or-update draft flow and its reports
//! - [`error`]: error types and Result alias

pub mod client;
pub mod credentials;
pub mod error;
pub mod mapping;
pub mod publish;

pub use client::{PostDraft, PostResponse, Term, WpClient};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use mapping::PostMap;
pub use publish::{FailureReport, PublishAction, PublishReport, publish};
