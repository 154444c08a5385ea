//! Invoice lookup use cases.

use std::sync::Arc;

use crate::models::Invoice;
use crate::services::connectors::{ConnectorError, PosConnector};

#[derive(Clone)]
pub struct InvoicesManager {
    connector: Arc<dyn PosConnector>,
}

impl InvoicesManager {
    pub fn new(connector: Arc<dyn PosConnector>) -> Self {
        Self { connector }
    }

    pub async fn get_invoice(
        &self,
        prefix: &str,
        number: i64,
    ) -> Result<Option<Invoice>, ConnectorError> {
        self.connector.get_invoice(prefix, number).await
    }
}
