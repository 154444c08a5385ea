pub mod connectors;
pub mod invoices;
pub mod users;

pub use connectors::{ConnectorError, NullConnector, PirposConnector, PosConnector};
pub use invoices::InvoicesManager;
pub use users::UsersManager;
