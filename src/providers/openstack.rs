//! OpenStack metadata implementation. No headers are required.

use tracing::debug;

use crate::client::MetadataClient;
use crate::error::MetadataError;
use crate::provider::MetadataField;

use super::fetch_plain;

/// OpenStack-specific metadata document, the preferred detection canary.
const META_DATA_JSON_PATH: &str = "/openstack/latest/meta_data.json";

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/openstack/latest/meta_data/uuid",
        MetadataField::Hostname => "/openstack/latest/meta_data/hostname",
        MetadataField::PrivateIpv4 => "/openstack/latest/meta_data/local-ipv4",
        MetadataField::PublicIpv4 => "/openstack/latest/meta_data/public-ipv4",
        MetadataField::PrimaryIpv6 => "/openstack/latest/meta_data/public-ipv6",
    }
}

/// Detection canary. Deployments differ in layout, so the instance-id path
/// is tried when `meta_data.json` is unavailable.
pub async fn probe(client: &MetadataClient) -> Result<String, MetadataError> {
    match fetch_plain(client, META_DATA_JSON_PATH).await {
        Ok(body) if !body.is_empty() => return Ok(body),
        Ok(_) => debug!("empty meta_data.json, falling back to instance id"),
        Err(error) => debug!(%error, "meta_data.json unavailable, falling back to instance id"),
    }
    fetch_plain(client, path(MetadataField::InstanceId)).await
}
