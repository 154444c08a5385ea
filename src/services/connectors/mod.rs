pub mod null;
pub mod pirpos;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Client, Invoice};

pub use null::NullConnector;
pub use pirpos::PirposConnector;

/// Classified connector failures.
///
/// The connector never recovers from these locally; they always propagate
/// to the caller unchanged.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Authentication exchange failed or the token field was missing.
    /// Fatal to connector construction.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Read-path failure: client search during a read, invoice fetch,
    /// or a malformed response.
    #[error("Fetch data error: {0}")]
    FetchData(String),

    /// Write-path failure: network, non-success status, or a business-rule
    /// violation (duplicate document on create, missing or ambiguous target
    /// on update).
    #[error("Send data error: {0}")]
    SendData(String),
}

/// Contract every POS connector fulfils.
///
/// Selected once at startup: the remote connector when credentials are
/// configured, [`NullConnector`] otherwise.
#[async_trait]
pub trait PosConnector: Send + Sync {
    /// Look up a client by document. `None` when the POS has no candidate.
    async fn get_client(&self, document: i64) -> Result<Option<Client>, ConnectorError>;

    /// Create a client on the POS. Fails if one with the same document
    /// already exists there.
    async fn upload_client(&self, client: &Client) -> Result<(), ConnectorError>;

    /// Overwrite the POS record matching the client's document. Refuses to
    /// guess when the match is missing or ambiguous.
    async fn update_client(&self, client: &Client) -> Result<(), ConnectorError>;

    /// Fetch an invoice by its `(prefix, number)` composite key.
    async fn get_invoice(
        &self,
        prefix: &str,
        number: i64,
    ) -> Result<Option<Invoice>, ConnectorError>;
}
