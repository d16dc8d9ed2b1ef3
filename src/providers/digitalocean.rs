//! DigitalOcean droplet metadata implementation. No headers are required.

use crate::provider::MetadataField;

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/metadata/v1/id",
        MetadataField::Hostname => "/metadata/v1/hostname",
        MetadataField::PrivateIpv4 => "/metadata/v1/interfaces/private/0/ipv4/address",
        MetadataField::PublicIpv4 => "/metadata/v1/interfaces/public/0/ipv4/address",
        MetadataField::PrimaryIpv6 => "/metadata/v1/interfaces/public/0/ipv6/address",
    }
}
