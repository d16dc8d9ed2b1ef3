//! CloudMetadata struct and core implementation.

use serde::Serialize;
use tracing::debug;

use crate::client::{ClientConfig, MetadataClient};
use crate::error::MetadataError;
use crate::provider::{CloudProvider, MetadataField};
use crate::providers::{aws, azure, digitalocean, fetch_plain, gcp, hetzner, oci, openstack};

/// Uniform interface for reading instance metadata from a cloud provider.
///
/// Usually obtained from [`crate::get_provider`]. A handle is immutable and
/// can be shared freely between tasks.
///
/// # Example
///
/// ```ignore
/// use cloudmeta::{CloudMetadata, CloudProvider, MetadataError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), MetadataError> {
///     let metadata = CloudMetadata::new(CloudProvider::Gcp)?;
///     println!("{}", metadata.private_ipv4().await?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CloudMetadata {
    provider: CloudProvider,
    client: MetadataClient,
}

/// Outcome of probing a single provider.
#[derive(Debug)]
pub enum Detection {
    Detected(CloudMetadata),
    NotDetected,
}

/// Every common field of an instance. Fields the provider does not report
/// are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceInfo {
    pub provider: CloudProvider,
    pub instance_id: Option<String>,
    pub hostname: Option<String>,
    pub private_ipv4: Option<String>,
    pub public_ipv4: Option<String>,
    pub primary_ipv6: Option<String>,
}

impl CloudMetadata {
    /// Create a handle for `provider` at its well-known address.
    pub fn new(provider: CloudProvider) -> Result<Self, MetadataError> {
        Self::with_config(provider, &ClientConfig::default())
    }

    /// Create a handle for `provider` using the given client settings.
    pub fn with_config(provider: CloudProvider, config: &ClientConfig) -> Result<Self, MetadataError> {
        let client = MetadataClient::new(config, provider.default_base_url())?;
        Ok(Self { provider, client })
    }

    /// Check whether `provider`'s metadata service is reachable.
    ///
    /// Issues a single canary request. Any failure, including an empty or
    /// whitespace-only answer, is reported as `NotDetected` and never as an
    /// error. The AWS token arrives untrimmed, so it is trimmed for this check.
    pub async fn probe(provider: CloudProvider, config: &ClientConfig) -> Detection {
        let metadata = match Self::with_config(provider, config) {
            Ok(metadata) => metadata,
            Err(error) => {
                debug!(%provider, %error, "failed to build metadata client");
                return Detection::NotDetected;
            }
        };

        match metadata.canary().await {
            Ok(value) if !value.trim().is_empty() => {
                debug!(%provider, "metadata probe succeeded");
                Detection::Detected(metadata)
            }
            Ok(_) => {
                debug!(%provider, "metadata probe returned an empty body");
                Detection::NotDetected
            }
            Err(error) => {
                debug!(%provider, %error, "metadata probe failed");
                Detection::NotDetected
            }
        }
    }

    async fn canary(&self) -> Result<String, MetadataError> {
        match self.provider {
            CloudProvider::Aws => aws::get_token(&self.client).await,
            CloudProvider::Gcp => gcp::fetch_project_id(&self.client).await,
            CloudProvider::OpenStack => openstack::probe(&self.client).await,
            CloudProvider::Azure
            | CloudProvider::Oci
            | CloudProvider::Hetzner
            | CloudProvider::DigitalOcean => self.instance_id().await,
        }
    }

    /// Get the cloud provider.
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Fixed lowercase identifier of the provider, e.g. `"aws"`.
    pub fn name(&self) -> &'static str {
        self.provider.name()
    }

    /// Base URL the handle sends requests to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Fetch one metadata field.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::NotFound` when the service answers 404, and
    /// a fetch failure (`Http`, `Request`, `Timeout`, ...) otherwise.
    pub async fn field(&self, field: MetadataField) -> Result<String, MetadataError> {
        match self.provider {
            CloudProvider::Aws => aws::fetch(&self.client, field).await,
            CloudProvider::Gcp => gcp::fetch(&self.client, field).await,
            CloudProvider::Azure => azure::fetch(&self.client, field).await,
            CloudProvider::Oci => oci::fetch(&self.client, field).await,
            CloudProvider::Hetzner => fetch_plain(&self.client, hetzner::path(field)).await,
            CloudProvider::OpenStack => fetch_plain(&self.client, openstack::path(field)).await,
            CloudProvider::DigitalOcean => {
                fetch_plain(&self.client, digitalocean::path(field)).await
            }
        }
    }

    pub async fn instance_id(&self) -> Result<String, MetadataError> {
        self.field(MetadataField::InstanceId).await
    }

    pub async fn hostname(&self) -> Result<String, MetadataError> {
        self.field(MetadataField::Hostname).await
    }

    pub async fn private_ipv4(&self) -> Result<String, MetadataError> {
        self.field(MetadataField::PrivateIpv4).await
    }

    pub async fn public_ipv4(&self) -> Result<String, MetadataError> {
        self.field(MetadataField::PublicIpv4).await
    }

    /// Fetch the primary IPv6 address.
    ///
    /// On GCP this is the first entry of the interface's address list, and
    /// an empty list fails with `MetadataError::NoIpv6Addresses`.
    pub async fn primary_ipv6(&self) -> Result<String, MetadataError> {
        self.field(MetadataField::PrimaryIpv6).await
    }

    /// Fetch every common field at once.
    ///
    /// Missing fields become `None`; any other error is returned.
    pub async fn instance_info(&self) -> Result<InstanceInfo, MetadataError> {
        Ok(InstanceInfo {
            provider: self.provider,
            instance_id: optional(self.instance_id().await)?,
            hostname: optional(self.hostname().await)?,
            private_ipv4: optional(self.private_ipv4().await)?,
            public_ipv4: optional(self.public_ipv4().await)?,
            primary_ipv6: optional(self.primary_ipv6().await)?,
        })
    }

    /// Fetch the GCP project ID.
    ///
    /// Returns `MetadataError::NotSupported` on other providers.
    pub async fn project_id(&self) -> Result<String, MetadataError> {
        match self.provider {
            CloudProvider::Gcp => gcp::fetch_project_id(&self.client).await,
            _ => Err(MetadataError::NotSupported),
        }
    }

    /// Fetch all IPv6 addresses of the primary GCP interface.
    ///
    /// Returns `MetadataError::NotSupported` on other providers.
    pub async fn ipv6_addresses(&self) -> Result<Vec<String>, MetadataError> {
        match self.provider {
            CloudProvider::Gcp => gcp::fetch_ipv6_addresses(&self.client).await,
            _ => Err(MetadataError::NotSupported),
        }
    }

    /// Request a fresh AWS IMDSv2 session token.
    ///
    /// Returns `MetadataError::NotSupported` on other providers.
    pub async fn imds_token(&self) -> Result<String, MetadataError> {
        match self.provider {
            CloudProvider::Aws => aws::get_token(&self.client).await,
            _ => Err(MetadataError::NotSupported),
        }
    }
}

fn optional(result: Result<String, MetadataError>) -> Result<Option<String>, MetadataError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(MetadataError::NotFound | MetadataError::NoIpv6Addresses) => Ok(None),
        Err(e) => Err(e),
    }
}
