//! Detect which cloud provider a host runs on and read its instance metadata.
//!
//! Each provider's link-local metadata service is probed in a fixed order
//! until one answers. The detected provider is cached for the lifetime of the
//! process and exposes a uniform set of accessors.
//!
//! # Example
//!
//! ```ignore
//! use cloudmeta::MetadataError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MetadataError> {
//!     let provider = cloudmeta::get_provider().await?;
//!     println!("running on {}", provider.name());
//!
//!     match provider.public_ipv4().await {
//!         Ok(ip) => println!("public ip: {ip}"),
//!         Err(MetadataError::NotFound) => println!("no public ip"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Providers
//!
//! | Provider | Detection canary | Required headers |
//! |----------|------------------|------------------|
//! | AWS | IMDSv2 token | `X-aws-ec2-metadata-token` |
//! | GCP | Project ID | `Metadata-Flavor: Google` |
//! | Azure | VM ID | `Metadata: true` |
//! | OCI | Instance ID | `Authorization: Bearer Oracle` |
//! | Hetzner | Instance ID | - |
//! | OpenStack | `meta_data.json`, then instance ID | - |
//! | DigitalOcean | Droplet ID | - |
//!
//! Requests are never retried. Dropping a pending future cancels the request.

mod client;
mod detect;
mod error;
mod metadata;
mod provider;
mod providers;

pub use client::{
    ClientConfig, AWS_DEFAULT_BASE_URL, CONNECT_TIMEOUT, DEFAULT_BASE_URL, MAX_BODY_SIZE,
    REQUEST_TIMEOUT,
};
pub use detect::{detect, get_provider, ProviderCache};
pub use error::MetadataError;
pub use metadata::{CloudMetadata, Detection, InstanceInfo};
pub use provider::{CloudProvider, MetadataField};
