//! Hetzner Cloud metadata implementation. No headers are required.

use crate::provider::MetadataField;

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/hetzner/v1/metadata/instance-id",
        MetadataField::Hostname => "/hetzner/v1/metadata/hostname",
        MetadataField::PrivateIpv4 => "/hetzner/v1/metadata/private-ipv4",
        MetadataField::PublicIpv4 => "/hetzner/v1/metadata/public-ipv4",
        MetadataField::PrimaryIpv6 => "/hetzner/v1/metadata/public-ipv6",
    }
}
