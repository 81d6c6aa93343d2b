use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;

use super::result::{ProbeFailure, ProbeResult};
use crate::core::config::{ProbeSettings, Target};
use crate::error::Result;

const MAX_REDIRECTS: usize = 10;

/// Issues one GET per target. No retries; failures become DOWN results.
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        if settings.accept_invalid_certs {
            log::warn!("TLS certificate validation is disabled for probes");
        }

        let mut builder = Client::builder()
            .user_agent(concat!("pulsecheck/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(settings.accept_invalid_certs);
        if !settings.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            timeout: settings.timeout,
        })
    }

    pub fn probe(&self, target: &Target) -> ProbeResult {
        let url = target.request_url();
        log::debug!("probing {}", url);

        match self.client.get(&url).send() {
            Ok(response) => ProbeResult::from_status(target.clone(), response.status().as_u16()),
            Err(e) if e.is_timeout() => {
                log::debug!("{} timed out: {}", url, e);
                ProbeResult::from_failure(
                    target.clone(),
                    ProbeFailure::Timeout,
                    format!("Request timeout after {} seconds", self.timeout.as_secs_f32()),
                )
            }
            Err(e) => {
                log::debug!("{} failed: {}", url, e);
                ProbeResult::from_failure(target.clone(), ProbeFailure::Error, error_chain(&e))
            }
        }
    }

    /// Probe sequentially; output order matches input order.
    pub fn probe_all(&self, targets: &[Target]) -> Vec<ProbeResult> {
        targets.iter().map(|target| self.probe(target)).collect()
    }
}

/// reqwest's top-level message hides the cause ("error sending request");
/// include the innermost source too.
fn error_chain(error: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = error;
    while let Some(next) = cause.source() {
        cause = next;
    }

    let top = error.to_string();
    let root = cause.to_string();
    if root == top {
        top
    } else {
        format!("{}: {}", top, root)
    }
}
