//! Azure IMDS implementation.

use crate::client::MetadataClient;
use crate::error::MetadataError;
use crate::provider::MetadataField;

/// API version query parameter.
const API_VERSION: &str = "2025-04-07";

/// Required header for Azure metadata requests.
const METADATA_HEADER: &str = "Metadata";

/// Required header value for Azure metadata requests.
const METADATA_VALUE: &str = "true";

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/metadata/instance/compute/vmId",
        MetadataField::Hostname => "/metadata/instance/compute/name",
        MetadataField::PrivateIpv4 => {
            "/metadata/instance/network/interface/0/ipv4/ipAddress/0/privateIpAddress"
        }
        MetadataField::PublicIpv4 => {
            "/metadata/instance/network/interface/0/ipv4/ipAddress/0/publicIpAddress"
        }
        MetadataField::PrimaryIpv6 => {
            "/metadata/instance/network/interface/0/ipv6/ipAddress/0/publicIpAddress"
        }
    }
}

/// Fetch a metadata field as plain text.
pub async fn fetch(client: &MetadataClient, field: MetadataField) -> Result<String, MetadataError> {
    let request = client
        .inner()
        .get(client.url(path(field)))
        .query(&[("api-version", API_VERSION), ("format", "text")])
        .header(METADATA_HEADER, METADATA_VALUE);
    client.fetch_text(request).await
}
