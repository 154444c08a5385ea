//! User synchronization use cases.

use std::sync::Arc;

use crate::models::Client;
use crate::services::connectors::{ConnectorError, PosConnector};

/// Façade between the request layer and whichever connector was wired in
/// at startup. Pure delegation, no additional rules.
#[derive(Clone)]
pub struct UsersManager {
    connector: Arc<dyn PosConnector>,
}

impl UsersManager {
    pub fn new(connector: Arc<dyn PosConnector>) -> Self {
        Self { connector }
    }

    pub async fn get_user(&self, document: i64) -> Result<Option<Client>, ConnectorError> {
        self.connector.get_client(document).await
    }

    pub async fn upload_user(&self, user: &Client) -> Result<(), ConnectorError> {
        self.connector.upload_client(user).await
    }

    pub async fn update_user(&self, user: &Client) -> Result<(), ConnectorError> {
        self.connector.update_client(user).await
    }
}
