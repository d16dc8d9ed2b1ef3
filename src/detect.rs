//! Provider detection and the process-wide detection cache.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::client::ClientConfig;
use crate::error::MetadataError;
use crate::metadata::{CloudMetadata, Detection};
use crate::provider::CloudProvider;

static PROVIDER: ProviderCache = ProviderCache::new(ClientConfig::new());

/// Get the provider this host runs on.
///
/// The first call probes every provider in [`CloudProvider::DETECTION_ORDER`];
/// concurrent callers wait for that single run. The outcome, including
/// `UnknownProvider`, is kept for the lifetime of the process.
///
/// # Errors
///
/// Returns `MetadataError::UnknownProvider` if no metadata service answered.
pub async fn get_provider() -> Result<&'static CloudMetadata, MetadataError> {
    PROVIDER.get().await
}

/// Probe each provider in order and return the first one detected.
///
/// Unlike [`get_provider`], nothing is cached.
pub async fn detect(config: &ClientConfig) -> Result<CloudMetadata, MetadataError> {
    for provider in CloudProvider::DETECTION_ORDER {
        if let Detection::Detected(metadata) = CloudMetadata::probe(provider, config).await {
            info!(%provider, base_url = metadata.base_url(), "detected cloud provider");
            return Ok(metadata);
        }
    }

    warn!("no cloud provider detected");
    Err(MetadataError::UnknownProvider)
}

/// One-time detection guard.
///
/// Detection runs at most once per cache; every caller observes the same
/// outcome until [`ProviderCache::reset`]. The static cache behind
/// [`get_provider`] is never reset.
#[derive(Debug)]
pub struct ProviderCache {
    cell: OnceCell<Option<CloudMetadata>>,
    config: ClientConfig,
}

impl ProviderCache {
    pub const fn new(config: ClientConfig) -> Self {
        Self {
            cell: OnceCell::const_new(),
            config,
        }
    }

    /// Client settings used for every probe.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Detect on first use, then return the cached outcome.
    pub async fn get(&self) -> Result<&CloudMetadata, MetadataError> {
        self.cell
            .get_or_init(|| async { detect(&self.config).await.ok() })
            .await
            .as_ref()
            .ok_or(MetadataError::UnknownProvider)
    }

    /// Whether detection has completed.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Forget the cached outcome so the next `get` probes again.
    pub fn reset(&mut self) {
        self.cell.take();
    }
}
