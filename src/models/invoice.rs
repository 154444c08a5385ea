//! Invoice domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::client::Client;
use crate::models::product::{Product, ProductTaxInfo};

/// Seller or cashier reference.
///
/// The POS exposes no stable employee id, so `employee_id` duplicates the
/// display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub employee_id: String,
}

/// A product line as it was sold.
///
/// Carries its own snapshot of the product: the catalog price and taxes may
/// have changed since the invoice was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceProduct {
    pub product: Product,
    pub gross_total: f64,
    pub total_price: f64,
    pub quantity: i64,
    pub taxes: Vec<ProductTaxInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_name: String,
    pub payment_value: f64,
}

/// Invoice lifecycle status, serialized with the POS display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[serde(rename = "Pagada")]
    Paid,
    #[serde(rename = "Anulada")]
    Canceled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Pagada",
            InvoiceStatus::Canceled => "Anulada",
        }
    }

    pub fn from_string(value: &str) -> Option<Self> {
        match value {
            "Pagada" => Some(InvoiceStatus::Paid),
            "Anulada" => Some(InvoiceStatus::Canceled),
            _ => None,
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Paid
    }
}

/// Issuing business data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub nit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Invoice-level tax summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTax {
    pub tax_name: String,
    pub value: f64,
    pub base: f64,
    pub total: f64,
}

/// Invoice record as fetched from the POS.
///
/// `(invoice_prefix, invoice_number)` is the remote composite key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub business: Business,
    pub seller: Employee,
    pub cashier: Employee,
    pub sell_point: String,
    pub client: Client,
    pub created_on: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_on: Option<DateTime<Utc>>,
    pub invoice_prefix: String,
    pub invoice_number: i64,
    pub payments: Vec<Payment>,
    pub products: Vec<InvoiceProduct>,
    pub total: f64,
    pub taxes: Vec<InvoiceTax>,
    #[serde(default)]
    pub status: InvoiceStatus,
}
