//! AWS IMDSv2 metadata implementation.

use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use tracing::debug;

use crate::client::{read_body_limited, send, MetadataClient};
use crate::error::MetadataError;
use crate::provider::MetadataField;

/// AWS IMDSv2 token endpoint path.
const TOKEN_PATH: &str = "/latest/api/token";

/// Token TTL header name.
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";

/// Requested token lifetime in seconds.
const TOKEN_TTL_SECONDS: &str = "21600";

/// Token header name for requests.
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

pub(crate) fn path(field: MetadataField) -> &'static str {
    match field {
        MetadataField::InstanceId => "/latest/meta-data/instance-id",
        MetadataField::Hostname => "/latest/meta-data/hostname",
        MetadataField::PrivateIpv4 => "/latest/meta-data/local-ipv4",
        MetadataField::PublicIpv4 => "/latest/meta-data/public-ipv4",
        MetadataField::PrimaryIpv6 => "/latest/meta-data/ipv6",
    }
}

/// Get an IMDSv2 session token.
///
/// The body of a 200 response is returned verbatim. Any other status fails
/// with `Http`, e.g. 403 when IMDSv2 is disabled. A whitespace-only body is
/// not a usable token; see [`usable_token`].
pub async fn get_token(client: &MetadataClient) -> Result<String, MetadataError> {
    let request = client
        .inner()
        .put(client.url(TOKEN_PATH))
        .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECONDS);
    let response = send(request).await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(MetadataError::Http(status.as_u16()));
    }

    let body = read_body_limited(response, client.max_body_size()).await?;
    String::from_utf8(body).map_err(|_| MetadataError::Utf8)
}

/// Whether a token body can be sent as a session token.
pub(crate) fn usable_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Fetch a metadata field, requesting a fresh token first.
///
/// A failed handshake does not abort the fetch; the request goes out without
/// a token and the service decides.
pub async fn fetch(client: &MetadataClient, field: MetadataField) -> Result<String, MetadataError> {
    let mut request = client.inner().get(client.url(path(field)));

    match get_token(client).await {
        Ok(token) if usable_token(&token) => match HeaderValue::from_str(&token) {
            Ok(value) => request = request.header(TOKEN_HEADER, value),
            Err(error) => debug!(%error, "IMDSv2 token is not a valid header value, fetching without it"),
        },
        Ok(_) => debug!("empty IMDSv2 token, fetching without it"),
        Err(error) => debug!(%error, "IMDSv2 token request failed, fetching without token"),
    }

    client.fetch_text(request).await
}
