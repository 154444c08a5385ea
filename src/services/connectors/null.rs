//! No-op connector for environments without POS credentials.

use async_trait::async_trait;

use super::{ConnectorError, PosConnector};
use crate::models::{Client, Invoice};

/// Connector that answers every call without touching the network.
///
/// Wired in when no PirPOS credentials are configured so the service comes
/// up and degrades gracefully instead of failing at startup: reads find
/// nothing, writes succeed as no-ops.
#[derive(Debug, Default, Clone)]
pub struct NullConnector;

impl NullConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PosConnector for NullConnector {
    async fn get_client(&self, document: i64) -> Result<Option<Client>, ConnectorError> {
        tracing::debug!(document, "[NULL] client lookup skipped");
        Ok(None)
    }

    async fn upload_client(&self, client: &Client) -> Result<(), ConnectorError> {
        tracing::debug!(document = client.document, "[NULL] client upload skipped");
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> Result<(), ConnectorError> {
        tracing::debug!(document = client.document, "[NULL] client update skipped");
        Ok(())
    }

    async fn get_invoice(
        &self,
        prefix: &str,
        number: i64,
    ) -> Result<Option<Invoice>, ConnectorError> {
        tracing::debug!(prefix, number, "[NULL] invoice lookup skipped");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, Responsibilities};

    fn any_client() -> Client {
        Client {
            name: "Julian Herrera".to_string(),
            email: "julian@example.com".to_string(),
            document: 1121923074,
            check_digit: None,
            document_type: DocumentType::CedulaCiudadania,
            phone: None,
            address: None,
            responsibilities: Responsibilities::default(),
            city_detail: None,
        }
    }

    #[tokio::test]
    async fn get_client_is_always_absent() {
        let connector = NullConnector::new();
        assert!(connector.get_client(1121923074).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_succeed_as_noops() {
        let connector = NullConnector::new();
        assert!(connector.upload_client(&any_client()).await.is_ok());
        assert!(connector.update_client(&any_client()).await.is_ok());
    }

    #[tokio::test]
    async fn get_invoice_is_always_absent() {
        let connector = NullConnector::new();
        assert!(connector.get_invoice("FE", 42).await.unwrap().is_none());
    }
}
