//! Per-provider metadata fetchers.

pub(crate) mod aws;
pub(crate) mod azure;
pub(crate) mod digitalocean;
pub(crate) mod gcp;
pub(crate) mod hetzner;
pub(crate) mod oci;
pub(crate) mod openstack;

use crate::client::MetadataClient;
use crate::error::MetadataError;

/// GET a path with no provider-specific headers.
pub(crate) async fn fetch_plain(
    client: &MetadataClient,
    path: &str,
) -> Result<String, MetadataError> {
    client.fetch_text(client.inner().get(client.url(path))).await
}
