//! One-shot endpoint reachability probing.
//!
//! # Responsibilities
//! - Parse each endpoint URL and resolve its host
//! - Attempt a TCP connection to the first resolved address
//! - Report the first failing step per endpoint
//!
//! Probes stop at the transport layer; no application request is sent, so
//! probing an endpoint never creates data on the receiving side.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use url::Url;

/// Result of probing a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// DNS resolved and a TCP connection was established.
    Reachable,

    /// The endpoint string is not a usable http(s) URL.
    InvalidUrl { reason: String },

    /// The host name did not resolve.
    DnsFailure { reason: String },

    /// Resolved, but no TCP connection could be established.
    ConnectFailure { reason: String },
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Reachable => f.write_str("reachable"),
            ProbeStatus::InvalidUrl { reason } => write!(f, "invalid URL: {reason}"),
            ProbeStatus::DnsFailure { reason } => write!(f, "DNS failure: {reason}"),
            ProbeStatus::ConnectFailure { reason } => write!(f, "connect failure: {reason}"),
        }
    }
}

/// Probe report for one endpoint.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Endpoint address exactly as supplied.
    pub endpoint: String,
    pub status: ProbeStatus,
    /// Address the TCP probe used, when resolution succeeded.
    pub addr: Option<SocketAddr>,
}

impl ProbeReport {
    pub fn is_reachable(&self) -> bool {
        self.status == ProbeStatus::Reachable
    }
}

/// Probe every endpoint in order, one bounded probe each.
pub async fn probe_endpoints(endpoints: &[String], per_probe_timeout: Duration) -> Vec<ProbeReport> {
    let mut reports = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let report = probe_endpoint(endpoint, per_probe_timeout).await;
        match &report.status {
            ProbeStatus::Reachable => {
                tracing::info!(endpoint = %endpoint, "endpoint reachable");
            }
            status => {
                tracing::warn!(endpoint = %endpoint, status = %status, "endpoint probe failed");
            }
        }
        reports.push(report);
    }
    reports
}

/// Probe a single endpoint: URL parse, DNS resolution, TCP connect.
///
/// The DNS and connect steps each respect `per_probe_timeout` independently.
pub async fn probe_endpoint(endpoint: &str, per_probe_timeout: Duration) -> ProbeReport {
    let report = |status: ProbeStatus, addr: Option<SocketAddr>| ProbeReport {
        endpoint: endpoint.to_string(),
        status,
        addr,
    };

    let url = match endpoint.parse::<Url>() {
        Ok(url) => url,
        Err(e) => {
            return report(
                ProbeStatus::InvalidUrl {
                    reason: e.to_string(),
                },
                None,
            )
        }
    };

    let Some(host) = url.host_str().map(str::to_string) else {
        return report(
            ProbeStatus::InvalidUrl {
                reason: "URL has no host".to_string(),
            },
            None,
        );
    };
    let Some(port) = url.port_or_known_default() else {
        return report(
            ProbeStatus::InvalidUrl {
                reason: "URL has no port".to_string(),
            },
            None,
        );
    };

    let addrs = match timeout(per_probe_timeout, lookup_host((host.as_str(), port))).await {
        Ok(Ok(addrs)) => addrs.collect::<Vec<_>>(),
        Ok(Err(e)) => {
            return report(
                ProbeStatus::DnsFailure {
                    reason: e.to_string(),
                },
                None,
            )
        }
        Err(_) => {
            return report(
                ProbeStatus::DnsFailure {
                    reason: format!(
                        "resolution timed out after {}ms",
                        per_probe_timeout.as_millis()
                    ),
                },
                None,
            )
        }
    };

    let Some(addr) = addrs.first().copied() else {
        return report(
            ProbeStatus::DnsFailure {
                reason: "host resolved to no addresses".to_string(),
            },
            None,
        );
    };

    match timeout(per_probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => report(ProbeStatus::Reachable, Some(addr)),
        Ok(Err(e)) => report(
            ProbeStatus::ConnectFailure {
                reason: e.to_string(),
            },
            Some(addr),
        ),
        Err(_) => report(
            ProbeStatus::ConnectFailure {
                reason: format!(
                    "connect timed out after {}ms",
                    per_probe_timeout.as_millis()
                ),
            },
            Some(addr),
        ),
    }
}
