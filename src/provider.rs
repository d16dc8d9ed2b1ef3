//! Cloud provider and metadata field enumerations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::client::{AWS_DEFAULT_BASE_URL, DEFAULT_BASE_URL};

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// Amazon Web Services
    Aws,
    /// Google Cloud Platform
    Gcp,
    /// Microsoft Azure
    Azure,
    /// Oracle Cloud Infrastructure
    Oci,
    /// Hetzner Cloud
    Hetzner,
    /// OpenStack
    OpenStack,
    /// DigitalOcean
    DigitalOcean,
}

impl CloudProvider {
    /// Order in which providers are probed during detection.
    ///
    /// When more than one metadata service answers, the earliest entry wins.
    pub const DETECTION_ORDER: [CloudProvider; 7] = [
        CloudProvider::Aws,
        CloudProvider::Gcp,
        CloudProvider::Azure,
        CloudProvider::Oci,
        CloudProvider::Hetzner,
        CloudProvider::OpenStack,
        CloudProvider::DigitalOcean,
    ];

    /// Fixed lowercase identifier of the provider.
    pub fn name(self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Azure => "azure",
            CloudProvider::Oci => "oci",
            CloudProvider::Hetzner => "hetzner",
            CloudProvider::OpenStack => "openstack",
            CloudProvider::DigitalOcean => "digitalocean",
        }
    }

    /// Well-known metadata service address for this provider.
    pub fn default_base_url(self) -> &'static str {
        match self {
            CloudProvider::Aws => AWS_DEFAULT_BASE_URL,
            _ => DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        CloudProvider::DETECTION_ORDER
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown provider: {} (expected aws, gcp, azure, oci, hetzner, openstack, or digitalocean)",
                    s
                )
            })
    }
}

/// Metadata fields readable from every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    InstanceId,
    Hostname,
    PrivateIpv4,
    PublicIpv4,
    PrimaryIpv6,
}

impl MetadataField {
    /// All fields, in display order.
    pub const ALL: [MetadataField; 5] = [
        MetadataField::InstanceId,
        MetadataField::Hostname,
        MetadataField::PrivateIpv4,
        MetadataField::PublicIpv4,
        MetadataField::PrimaryIpv6,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataField::InstanceId => "instance-id",
            MetadataField::Hostname => "hostname",
            MetadataField::PrivateIpv4 => "private-ipv4",
            MetadataField::PublicIpv4 => "public-ipv4",
            MetadataField::PrimaryIpv6 => "ipv6",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        MetadataField::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}
