//! Implements IpProber by scraping the portal status page.
//!
//! The device serves GB2312 HTML; the body is decoded before matching.

use super::http::PortalHttp;
use crate::domain::{ClientIp, ProbeError};
use crate::ports::IpProber;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

static CLIENT_IP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"ss5="(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})""#).expect("CLIENT_IP_RE should compile")
});

/// Decode a status page body. GBK is the superset decoder for the `gb2312` label.
pub fn decode_status_page(bytes: &[u8]) -> String {
    let (text, had_errors) = encoding_rs::GBK.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("status page contained bytes outside GB2312; replaced");
    }
    text.into_owned()
}

/// First `ss5="<ipv4>"` in the page, if any.
pub fn extract_client_ip(html: &str) -> Option<ClientIp> {
    CLIENT_IP_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| ClientIp::new(m.as_str()))
}

pub struct PortalIpProber {
    http: Arc<PortalHttp>,
}

impl PortalIpProber {
    pub fn new(http: Arc<PortalHttp>) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl IpProber for PortalIpProber {
    async fn probe_ip(&self) -> Result<ClientIp, ProbeError> {
        let url = self.http.status_url();
        let res = self
            .http
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "status page request failed");
                ProbeError::Network(e.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status();
            warn!(url, status = %status, "status page returned error status");
            return Err(ProbeError::Network(format!("HTTP {}", status)));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| ProbeError::Network(format!("read body: {}", e)))?;
        let html = decode_status_page(&bytes);

        match extract_client_ip(&html) {
            Some(ip) => {
                info!(ip = %ip, "client IP discovered");
                Ok(ip)
            }
            None => {
                info!(body_len = html.len(), "no client IP on status page");
                Err(ProbeError::NotFound)
            }
        }
    }
}
