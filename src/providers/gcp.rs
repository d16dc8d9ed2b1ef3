//! GCP metadata implementation.

use crate::client::MetadataClient;
use crate::error::MetadataError;
use crate::provider::MetadataField;

/// Project ID path, used as the detection canary.
const PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";

/// Required header for GCP metadata requests.
const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";

/// Required header value for GCP metadata requests.
const METADATA_FLAVOR_VALUE: &str = "Google";

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/computeMetadata/v1/instance/id",
        MetadataField::Hostname => "/computeMetadata/v1/instance/hostname",
        MetadataField::PrivateIpv4 => "/computeMetadata/v1/instance/network-interfaces/0/ip",
        MetadataField::PublicIpv4 => {
            "/computeMetadata/v1/instance/network-interfaces/0/access-configs/0/external-ip"
        }
        MetadataField::PrimaryIpv6 => "/computeMetadata/v1/instance/network-interfaces/0/ipv6s",
    }
}

async fn fetch_path(client: &MetadataClient, path: &str) -> Result<String, MetadataError> {
    let request = client
        .inner()
        .get(client.url(path))
        .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE);
    client.fetch_text(request).await
}

/// Fetch the project ID.
pub async fn fetch_project_id(client: &MetadataClient) -> Result<String, MetadataError> {
    fetch_path(client, PROJECT_ID_PATH).await
}

/// Fetch the IPv6 addresses of the primary interface, in service order.
pub async fn fetch_ipv6_addresses(client: &MetadataClient) -> Result<Vec<String>, MetadataError> {
    let body = fetch_path(client, path(MetadataField::PrimaryIpv6)).await?;
    Ok(split_addresses(&body))
}

fn split_addresses(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fetch a metadata field. The primary IPv6 is the first listed address.
pub async fn fetch(client: &MetadataClient, field: MetadataField) -> Result<String, MetadataError> {
    match field {
        MetadataField::PrimaryIpv6 => fetch_ipv6_addresses(client)
            .await?
            .into_iter()
            .next()
            .ok_or(MetadataError::NoIpv6Addresses),
        _ => fetch_path(client, path(field)).await,
    }
}
