//! Oracle Cloud Infrastructure (IMDS v2) implementation.

use reqwest::header::AUTHORIZATION;

use crate::client::MetadataClient;
use crate::error::MetadataError;
use crate::provider::MetadataField;

/// OCI rejects v2 requests without this header.
const AUTHORIZATION_VALUE: &str = "Bearer Oracle";

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/opc/v2/instance/id",
        MetadataField::Hostname => "/opc/v2/instance/hostname",
        MetadataField::PrivateIpv4 => "/opc/v2/vnics/0/privateIp",
        MetadataField::PublicIpv4 => "/opc/v2/vnics/0/publicIp",
        MetadataField::PrimaryIpv6 => "/opc/v2/vnics/0/ipv6",
    }
}

pub async fn fetch(client: &MetadataClient, field: MetadataField) -> Result<String, MetadataError> {
    let request = client
        .inner()
        .get(client.url(path(field)))
        .header(AUTHORIZATION, AUTHORIZATION_VALUE);
    client.fetch_text(request).await
}
