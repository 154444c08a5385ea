//! PirPOS connector.
//!
//! Talks to the PirPOS HTTP API. The API has no exact-match lookup by
//! document: client reads go through a fuzzy `clientData` search whose
//! candidate list is disambiguated locally, and writes re-run that search
//! to enforce uniqueness the remote side does not.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::wire::{
    decode_client, decode_invoice, encode_client, Candidate, ClientRecord, ClientsResponse,
    InvoicesResponse,
};
use super::{ConnectorError, PosConnector};
use crate::config::PirposConfig;
use crate::models::{Client, Invoice};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// The search endpoint only supports fixed-size pagination; one page is all
// the disambiguation logic ever looks at.
const CLIENT_PAGE_SIZE: &str = "10";
const CLIENT_PAGE: &str = "0";

#[derive(Debug, Serialize)]
struct LoginRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "tokenCurrent")]
    token_current: Option<String>,
}

/// Connector against the live PirPOS API.
///
/// Authenticates once at construction; the bearer token is held unchanged
/// for the connector's whole lifetime. No refresh, no retries: a failed
/// call is a failed operation.
pub struct PirposConnector {
    client: HttpClient,
    config: PirposConfig,
    access_token: String,
}

impl PirposConnector {
    /// Exchange the configured credentials for a bearer token and build
    /// the connector. Fails fast with [`ConnectorError::Credentials`] when
    /// the exchange is rejected or the token field is missing.
    pub async fn connect(config: PirposConfig) -> Result<Self, ConnectorError> {
        let client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ConnectorError::Credentials(format!("can't build HTTP client: {e}")))?;

        let access_token = Self::login(&client, &config).await?;

        tracing::info!("PirPOS connector initialized");
        Ok(Self {
            client,
            config,
            access_token,
        })
    }

    async fn login(client: &HttpClient, config: &PirposConfig) -> Result<String, ConnectorError> {
        let url = format!("{}/login", config.api_base_url);
        let request = LoginRequest {
            name: String::new(),
            email: config.username.clone(),
            password: config.password.expose_secret().clone(),
        };

        let response = client.post(&url).json(&request).send().await.map_err(|e| {
            ConnectorError::Credentials(format!("can't reach PirPOS login: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(ConnectorError::Credentials(
                "error getting PirPOS token, check email and password".to_string(),
            ));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            ConnectorError::Credentials(format!("can't parse PirPOS login response: {e}"))
        })?;

        body.token_current.ok_or_else(|| {
            ConnectorError::Credentials(
                "tokenCurrent key is not present in the response".to_string(),
            )
        })
    }

    /// Run the fuzzy `clientData` search and decode every candidate.
    async fn search_clients(&self, document: i64) -> Result<Vec<Candidate>, ConnectorError> {
        let url = format!("{}/clients", self.config.api_base_url);
        let client_data = document.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("pagination", "true"),
                ("limit", CLIENT_PAGE_SIZE),
                ("page", CLIENT_PAGE),
                ("clientData", client_data.as_str()),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ConnectorError::FetchData(format!("can't download PirPOS clients: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::FetchData(format!(
                "PirPOS client search returned status {status}: {body}"
            )));
        }

        let body: ClientsResponse = response.json().await.map_err(|e| {
            ConnectorError::FetchData(format!("can't parse PirPOS clients response: {e}"))
        })?;

        body.data
            .into_iter()
            .map(|record| {
                decode_client(record).map_err(|e| ConnectorError::FetchData(e.to_string()))
            })
            .collect()
    }

    /// POST a client record. Create and update share the endpoint; a
    /// payload carrying a known `_id` overwrites that record.
    async fn post_client(&self, record: &ClientRecord) -> Result<(), ConnectorError> {
        let url = format!("{}/clients", self.config.api_base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(record)
            .send()
            .await
            .map_err(|e| ConnectorError::SendData(format!("can't send client to PirPOS: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::SendData(format!(
                "PirPOS client upload returned status {status}: {body}"
            )));
        }

        Ok(())
    }
}

// Search failures inside a write path are write failures.
fn as_send_error(error: ConnectorError) -> ConnectorError {
    match error {
        ConnectorError::FetchData(message) => ConnectorError::SendData(message),
        other => other,
    }
}

#[async_trait]
impl PosConnector for PirposConnector {
    async fn get_client(&self, document: i64) -> Result<Option<Client>, ConnectorError> {
        let mut candidates = self.search_clients(document).await?;

        match candidates.len() {
            0 => Ok(None),
            1 => Ok(Some(candidates.remove(0).client)),
            _ => {
                if let Some(found) = candidates
                    .iter()
                    .position(|candidate| candidate.client.document == document)
                {
                    return Ok(Some(candidates.remove(found).client));
                }
                tracing::warn!(
                    document,
                    candidates = candidates.len(),
                    "more than one client found and none matches exactly, using the first element"
                );
                Ok(Some(candidates.remove(0).client))
            }
        }
    }

    async fn upload_client(&self, client: &Client) -> Result<(), ConnectorError> {
        // The POS has no uniqueness constraint on document; enforce it here.
        let existing = self
            .get_client(client.document)
            .await
            .map_err(as_send_error)?;
        if let Some(existing) = existing {
            if existing.document == client.document {
                return Err(ConnectorError::SendData(format!(
                    "client with document {} already exists",
                    client.document
                )));
            }
        }

        self.post_client(&encode_client(client, None)).await?;
        tracing::info!(document = client.document, "client uploaded to PirPOS");
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> Result<(), ConnectorError> {
        let candidates = self
            .search_clients(client.document)
            .await
            .map_err(as_send_error)?;

        let mut exact = candidates
            .into_iter()
            .filter(|candidate| candidate.client.document == client.document);

        let target = match (exact.next(), exact.next()) {
            (None, _) => {
                return Err(ConnectorError::SendData(format!(
                    "no client with document {} to update",
                    client.document
                )));
            }
            (Some(_), Some(_)) => {
                // Unlike reads, updates never guess which record to overwrite.
                return Err(ConnectorError::SendData(format!(
                    "more than one client with document {}, refusing to update",
                    client.document
                )));
            }
            (Some(target), None) => target,
        };

        let remote_id = target.remote_id.as_deref().ok_or_else(|| {
            ConnectorError::SendData(format!(
                "client with document {} has no remote id",
                client.document
            ))
        })?;

        self.post_client(&encode_client(client, Some(remote_id)))
            .await?;
        tracing::info!(document = client.document, "client updated on PirPOS");
        Ok(())
    }

    async fn get_invoice(
        &self,
        prefix: &str,
        number: i64,
    ) -> Result<Option<Invoice>, ConnectorError> {
        let url = format!("{}/invoices", self.config.api_base_url);
        let composite = format!("{prefix}{number}");
        let response = self
            .client
            .get(&url)
            .query(&[("number", composite.as_str())])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                ConnectorError::FetchData(format!("can't download PirPOS invoices: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::FetchData(format!(
                "PirPOS invoice fetch returned status {status}: {body}"
            )));
        }

        let body: InvoicesResponse = response.json().await.map_err(|e| {
            ConnectorError::FetchData(format!("can't parse PirPOS invoices response: {e}"))
        })?;

        // The composite key is unique remotely; anything past the first
        // record is not expected.
        match body.data.into_iter().next() {
            None => Ok(None),
            Some(record) => decode_invoice(record)
                .map(Some)
                .map_err(|e| ConnectorError::FetchData(e.to_string())),
        }
    }
}
