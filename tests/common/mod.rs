//! Mock metadata services shared by the integration tests.

#![allow(dead_code)]

use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudmeta::{ClientConfig, CloudMetadata, CloudProvider};

pub const AWS_TOKEN: &str = "AQAAANhJbmV0YW1ldGFkYXRhLmFtYXpvbmF3cy5jb20vMjAyMi0xMi0yMQ==";

pub const GCP_IPV6S: [&str; 3] = [
    "2001:db8:85a3::8a2e:370:7334",
    "2001:db8:85a3::8a2e:370:7335",
    "2001:db8:85a3::8a2e:370:7336",
];

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(server.uri())
}

pub fn metadata(provider: CloudProvider, server: &MockServer) -> CloudMetadata {
    CloudMetadata::with_config(provider, &config(server)).unwrap()
}

async fn respond(server: &MockServer, method_name: &str, route: &str, status: u16, body: &str) {
    Mock::given(method(method_name))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// AWS IMDSv2 service. The token endpoint requires the TTL header and every
/// metadata path requires the issued token; anything else gets 401.
pub async fn mount_aws(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path("/latest/api/token"))
        .and(header("X-aws-ec2-metadata-token-ttl-seconds", "21600"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AWS_TOKEN))
        .mount(server)
        .await;

    for (route, value) in [
        ("/latest/meta-data/instance-id", "i-1234567890abcdef0"),
        ("/latest/meta-data/local-ipv4", "10.0.1.100"),
        ("/latest/meta-data/public-ipv4", "54.123.45.67"),
        ("/latest/meta-data/ipv6", "2001:0db8:85a3:0000:0000:8a2e:0370:7334"),
        (
            "/latest/meta-data/hostname",
            "ip-10-0-1-100.us-west-2.compute.internal",
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("X-aws-ec2-metadata-token", AWS_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_string(value))
            .with_priority(1)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path_regex("^/latest/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("Invalid or missing IMDSv2 token"),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

/// AWS with IMDSv2 disabled by policy.
pub async fn mount_aws_disabled(server: &MockServer) {
    Mock::given(path_regex("^/latest/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string("IMDSv2 disabled or blocked by security policy"),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

/// GCP metadata server. Requests without `Metadata-Flavor: Google` get 403.
pub async fn mount_gcp(server: &MockServer) {
    for (route, value) in [
        ("/computeMetadata/v1/project/project-id", "my-test-project".to_string()),
        ("/computeMetadata/v1/instance/id", "1234567890123456789".to_string()),
        (
            "/computeMetadata/v1/instance/network-interfaces/0/ip",
            "10.128.0.5".to_string(),
        ),
        (
            "/computeMetadata/v1/instance/network-interfaces/0/access-configs/0/external-ip",
            "34.123.45.67".to_string(),
        ),
        (
            "/computeMetadata/v1/instance/network-interfaces/0/ipv6s",
            GCP_IPV6S.join("\n"),
        ),
        (
            "/computeMetadata/v1/instance/hostname",
            "test-instance-1.c.my-test-project.internal".to_string(),
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("Metadata-Flavor", "Google"))
            .respond_with(ResponseTemplate::new(200).set_body_string(value))
            .with_priority(1)
            .mount(server)
            .await;
    }

    mount_gcp_header_check(server).await;
}

/// Reject GCP requests lacking the flavor header, as the real service does.
pub async fn mount_gcp_header_check(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex("^/computeMetadata/v1/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Missing Metadata-Flavor header"))
        .with_priority(10)
        .mount(server)
        .await;
}

pub async fn mount_azure(server: &MockServer) {
    for (route, value) in [
        ("/metadata/instance/compute/vmId", "02aab8a4-74ef-476e-8182-f6d2ba4166a6"),
        ("/metadata/instance/compute/name", "examplevmname"),
        (
            "/metadata/instance/network/interface/0/ipv4/ipAddress/0/privateIpAddress",
            "10.144.133.132",
        ),
        (
            "/metadata/instance/network/interface/0/ipv4/ipAddress/0/publicIpAddress",
            "20.1.2.3",
        ),
        (
            "/metadata/instance/network/interface/0/ipv6/ipAddress/0/publicIpAddress",
            "2603:1030:20c:3::1",
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("api-version", "2025-04-07"))
            .and(query_param("format", "text"))
            .and(header("Metadata", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(value))
            .mount(server)
            .await;
    }
}

pub async fn mount_oci(server: &MockServer) {
    for (route, value) in [
        ("/opc/v2/instance/id", "ocid1.instance.oc1.phx.exampleuniqueid"),
        ("/opc/v2/instance/hostname", "oci-instance"),
        ("/opc/v2/vnics/0/privateIp", "10.0.0.2"),
        ("/opc/v2/vnics/0/publicIp", "129.146.1.2"),
        ("/opc/v2/vnics/0/ipv6", "2603:c020:4:1::2"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("Authorization", "Bearer Oracle"))
            .respond_with(ResponseTemplate::new(200).set_body_string(value))
            .mount(server)
            .await;
    }
}

pub async fn mount_hetzner(server: &MockServer) {
    for (route, value) in [
        ("/hetzner/v1/metadata/instance-id", "12345678"),
        ("/hetzner/v1/metadata/hostname", "hetzner-server"),
        ("/hetzner/v1/metadata/private-ipv4", "10.0.0.3"),
        ("/hetzner/v1/metadata/public-ipv4", "116.203.1.2"),
        ("/hetzner/v1/metadata/public-ipv6", "2a01:4f8:c17:1::1"),
    ] {
        respond(server, "GET", route, 200, value).await;
    }
}

pub async fn mount_openstack(server: &MockServer) {
    for (route, value) in [
        (
            "/openstack/latest/meta_data.json",
            r#"{"uuid": "d8e02d56-2648-49a3-bf97-6be8f1204f38"}"#,
        ),
        (
            "/openstack/latest/meta_data/uuid",
            "d8e02d56-2648-49a3-bf97-6be8f1204f38",
        ),
        ("/openstack/latest/meta_data/hostname", "openstack-vm"),
        ("/openstack/latest/meta_data/local-ipv4", "192.168.0.10"),
    ] {
        respond(server, "GET", route, 200, value).await;
    }
}

pub async fn mount_digitalocean(server: &MockServer) {
    for (route, value) in [
        ("/metadata/v1/id", "2756294"),
        ("/metadata/v1/hostname", "sample-droplet"),
        ("/metadata/v1/interfaces/private/0/ipv4/address", "10.132.255.113"),
        ("/metadata/v1/interfaces/public/0/ipv4/address", "104.131.20.105"),
        (
            "/metadata/v1/interfaces/public/0/ipv6/address",
            "2604:A880:0800:0010:0000:0000:017D:2001",
        ),
    ] {
        respond(server, "GET", route, 200, value).await;
    }
}

/// Mount a fully working service for `provider`.
pub async fn mount(provider: CloudProvider, server: &MockServer) {
    match provider {
        CloudProvider::Aws => mount_aws(server).await,
        CloudProvider::Gcp => mount_gcp(server).await,
        CloudProvider::Azure => mount_azure(server).await,
        CloudProvider::Oci => mount_oci(server).await,
        CloudProvider::Hetzner => mount_hetzner(server).await,
        CloudProvider::OpenStack => mount_openstack(server).await,
        CloudProvider::DigitalOcean => mount_digitalocean(server).await,
    }
}
