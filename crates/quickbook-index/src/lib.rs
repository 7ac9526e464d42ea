//! Vector index provisioning for OpenSearch Serverless collections.

pub mod client;
pub mod directory;
pub mod endpoint;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provision;
pub mod schema;
pub mod signer;

pub use client::{CreateOutcome, IndexClient};
pub use directory::{AossDirectory, CollectionDirectory};
pub use endpoint::CollectionEndpoint;
pub use error::IndexError;
pub use provision::{ProvisionReport, Provisioner};
pub use schema::IndexBody;
pub use signer::{RequestSigner, SigV4Signer, Unsigned};
