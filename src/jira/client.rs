use std::path::PathBuf;

use log::warn;
use reqwest::{Certificate, Client, Identity};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{PrbtimeError, Result};

/// TLS material for the tracker connection. The client certificate
/// authenticates us; verification of the server stays on unless
/// explicitly disabled.
#[derive(Debug, Default)]
pub struct TlsOptions {
    pub identity_pem: Option<PathBuf>,
    pub ca_bundle: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

pub struct JiraClient {
    pub client: Client,
    pub api_url: Url,
}

impl JiraClient {
    pub fn new(base_url: &str, tls: &TlsOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent("prbtime/0.1.0");

        if let Some(path) = &tls.identity_pem {
            let pem = std::fs::read(path)?;
            let identity = Identity::from_pem(&pem).map_err(|e| {
                PrbtimeError::Config(format!(
                    "Invalid client certificate {}: {e}",
                    path.display()
                ))
            })?;
            builder = builder.identity(identity);
        }

        if let Some(path) = &tls.ca_bundle {
            let pem = std::fs::read(path)?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                PrbtimeError::Config(format!("Invalid CA bundle {}: {e}", path.display()))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        if tls.accept_invalid_certs {
            warn!("TLS server certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| PrbtimeError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| PrbtimeError::Config(format!("Invalid base URL: {e}")))?
            .join("rest/api/2/")
            .map_err(|e| PrbtimeError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self { client, api_url })
    }

    /// One GET against the API. Non-2xx responses surface as `Api`
    /// errors; the body is decoded separately from the transport so a
    /// malformed payload classifies as a data-shape error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.client.get(url.clone()).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrbtimeError::Api {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| PrbtimeError::Config(format!("Invalid endpoint URL '{path}': {e}")))
    }
}
