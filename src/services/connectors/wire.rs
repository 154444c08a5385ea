//! Wire codec for the PirPOS JSON API.
//!
//! Pure translation between the remote record shapes and the domain model.
//! Outbound payloads omit absent fields entirely, since the POS rejects
//! unexpected nulls on some of them. Inbound decoding never coerces an
//! unknown enum code; it fails the whole record instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Business, CityDetail, Client, DocumentType, Employee, Invoice, InvoiceProduct, InvoiceStatus,
    InvoiceTax, Payment, Product, ProductTaxInfo, Responsibilities,
};
use crate::utils::normalize;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("unknown document type code: {0}")]
    UnknownDocumentType(u8),

    #[error("unknown responsibility code: {0}")]
    UnknownResponsibility(String),

    #[error("unknown invoice status: {0}")]
    UnknownInvoiceStatus(String),
}

/// Client record as the POS sends and receives it.
///
/// `_id` is the remote-assigned opaque identifier; it is present on fetched
/// records and only set on outbound payloads when targeting an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub document: i64,
    pub id_document_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_detail: Option<CityDetailRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_social_reason: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibility_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetailRecord {
    pub city_code: String,
    pub country_code: String,
    pub state_code: String,
    pub state_name: String,
    pub city_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientsResponse {
    pub data: Vec<ClientRecord>,
}

/// A decoded search result: the domain client plus the remote id needed to
/// target updates. Never exposed past the connector.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub remote_id: Option<String>,
    pub client: Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub nit: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaxRecord {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTaxRecord {
    pub name: String,
    pub value: f64,
    pub base: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceProductRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub base_price: f64,
    pub total_price: f64,
    pub total_bruto: f64,
    pub quantity: i64,
    #[serde(default)]
    pub taxes: Vec<TaxRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub business: BusinessRecord,
    pub seller: EmployeeRecord,
    pub cashier: EmployeeRecord,
    pub sell_point: String,
    pub client: ClientRecord,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub anulated_date: Option<DateTime<Utc>>,
    pub prefix: String,
    pub number: i64,
    pub payments: Vec<PaymentRecord>,
    pub products: Vec<InvoiceProductRecord>,
    #[serde(default)]
    pub taxes: Vec<InvoiceTaxRecord>,
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InvoicesResponse {
    pub data: Vec<InvoiceRecord>,
}

/// Translate a domain client into the POS payload.
///
/// `remote_id` carries the previously-resolved opaque id when the POST is
/// an update; the POS treats a same-id POST as an overwrite.
pub fn encode_client(client: &Client, remote_id: Option<&str>) -> ClientRecord {
    ClientRecord {
        id: remote_id.map(str::to_string),
        name: client.name.clone(),
        document: client.document,
        id_document_type: client.document_type.code(),
        document_name: Some(client.document_type.label().to_string()),
        city_detail: client.city_detail.as_ref().map(|detail| CityDetailRecord {
            city_code: detail.city_code.clone(),
            country_code: detail.country_code.clone(),
            state_code: detail.state_code.clone(),
            state_name: detail.city_state.clone(),
            city_name: detail.city_name.clone(),
        }),
        is_social_reason: Some(client.document_type == DocumentType::Nit),
        responsibilities: Some(client.responsibilities.code().to_string()),
        responsibility_name: Some(client.responsibilities.label().to_string()),
        last_name: None,
        check_digit: client.check_digit,
        email: if client.email.is_empty() {
            None
        } else {
            Some(client.email.clone())
        },
        phone: client.phone.clone(),
        address: client.address.clone(),
    }
}

/// Translate a fetched POS client record into a domain candidate.
pub fn decode_client(record: ClientRecord) -> Result<Candidate, DecodeError> {
    let document_type = DocumentType::from_code(record.id_document_type)
        .ok_or(DecodeError::UnknownDocumentType(record.id_document_type))?;

    let responsibilities = match record.responsibilities.as_deref() {
        Some(code) => Responsibilities::from_code(code)
            .ok_or_else(|| DecodeError::UnknownResponsibility(code.to_string()))?,
        None => Responsibilities::default(),
    };

    // City detail travels as a complete bundle or not at all.
    let city_detail = record.city_detail.map(|detail| CityDetail {
        city_name: detail.city_name,
        city_state: detail.state_name,
        city_code: detail.city_code,
        country_code: detail.country_code,
        state_code: detail.state_code,
    });

    Ok(Candidate {
        remote_id: record.id,
        client: Client {
            name: record.name,
            email: record.email.unwrap_or_default(),
            document: record.document,
            check_digit: record.check_digit,
            document_type,
            phone: record.phone,
            address: record.address,
            responsibilities,
            city_detail,
        },
    })
}

/// Translate a fetched POS invoice record into the domain invoice.
pub fn decode_invoice(record: InvoiceRecord) -> Result<Invoice, DecodeError> {
    let status = match record.status.as_deref() {
        Some(value) => InvoiceStatus::from_string(value)
            .ok_or_else(|| DecodeError::UnknownInvoiceStatus(value.to_string()))?,
        None => InvoiceStatus::default(),
    };

    let client = decode_client(record.client)?.client;

    Ok(Invoice {
        business: Business {
            name: record.business.name,
            nit: record.business.nit,
            address: record.business.address,
            phone: record.business.phone,
        },
        seller: employee_from_name(record.seller.name),
        cashier: employee_from_name(record.cashier.name),
        sell_point: record.sell_point,
        client,
        created_on: record.created_on,
        canceled_on: record.anulated_date,
        invoice_prefix: record.prefix,
        invoice_number: record.number,
        payments: record
            .payments
            .into_iter()
            .map(|payment| Payment {
                payment_name: payment.name,
                payment_value: payment.value,
            })
            .collect(),
        products: record
            .products
            .into_iter()
            .map(decode_invoice_product)
            .collect(),
        total: record.total,
        taxes: record
            .taxes
            .into_iter()
            .map(|tax| InvoiceTax {
                tax_name: tax.name,
                value: tax.value,
                base: tax.base,
                total: tax.total,
            })
            .collect(),
        status,
    })
}

// The POS has no stable employee id; the display name doubles as one.
fn employee_from_name(name: String) -> Employee {
    Employee {
        employee_id: name.clone(),
        name,
    }
}

fn decode_invoice_product(record: InvoiceProductRecord) -> InvoiceProduct {
    let taxes: Vec<ProductTaxInfo> = record
        .taxes
        .into_iter()
        .map(|tax| ProductTaxInfo {
            tax_name: tax.name,
            value: tax.value,
        })
        .collect();

    InvoiceProduct {
        product: Product {
            product_id: record.id,
            name: normalize(&record.name),
            base_price: record.base_price,
            total_price: record.total_price,
            taxes: taxes.clone(),
        },
        gross_total: record.total_bruto,
        total_price: record.total_price,
        quantity: record.quantity,
        taxes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_record() -> ClientRecord {
        serde_json::from_value(json!({
            "_id": "64f0a7",
            "name": "Julian Herrera",
            "document": 1121923074_i64,
            "idDocumentType": 13,
        }))
        .unwrap()
    }

    #[test]
    fn decode_defaults_absent_fields() {
        let candidate = decode_client(raw_record()).unwrap();
        assert_eq!(candidate.remote_id.as_deref(), Some("64f0a7"));
        assert_eq!(candidate.client.email, "");
        assert_eq!(
            candidate.client.responsibilities,
            Responsibilities::R99Pn
        );
        assert_eq!(candidate.client.city_detail, None);
    }

    #[test]
    fn decode_fails_on_unknown_document_type() {
        let mut record = raw_record();
        record.id_document_type = 99;
        assert_eq!(
            decode_client(record).unwrap_err(),
            DecodeError::UnknownDocumentType(99)
        );
    }

    #[test]
    fn decode_fails_on_unknown_responsibility() {
        let mut record = raw_record();
        record.responsibilities = Some("O-99".to_string());
        assert_eq!(
            decode_client(record).unwrap_err(),
            DecodeError::UnknownResponsibility("O-99".to_string())
        );
    }

    #[test]
    fn decode_maps_city_bundle() {
        let mut record = raw_record();
        record.city_detail = Some(CityDetailRecord {
            city_code: "05001".to_string(),
            country_code: "CO".to_string(),
            state_code: "05".to_string(),
            state_name: "Antioquia".to_string(),
            city_name: "Medellín".to_string(),
        });
        let city = decode_client(record).unwrap().client.city_detail.unwrap();
        assert_eq!(city.city_name, "Medellín");
        assert_eq!(city.city_state, "Antioquia");
        assert_eq!(city.state_code, "05");
    }

    #[test]
    fn encode_omits_absent_fields() {
        let client = Client {
            name: "Julian Herrera".to_string(),
            email: String::new(),
            document: 1121923074,
            check_digit: None,
            document_type: DocumentType::CedulaCiudadania,
            phone: None,
            address: None,
            responsibilities: Responsibilities::R99Pn,
            city_detail: None,
        };

        let value = serde_json::to_value(encode_client(&client, None)).unwrap();
        let object = value.as_object().unwrap();
        for absent in ["_id", "email", "phone", "address", "checkDigit", "cityDetail"] {
            assert!(!object.contains_key(absent), "{absent} should be omitted");
        }
        assert_eq!(value["idDocumentType"], 13);
        assert_eq!(value["documentName"], "Cédula de ciudadanía");
        assert_eq!(value["responsibilities"], "R-99-PN");
        assert_eq!(value["isSocialReason"], false);
    }

    #[test]
    fn encode_derives_social_reason_for_nit() {
        let client = Client {
            name: "ACME SAS".to_string(),
            email: "billing@acme.co".to_string(),
            document: 900123456,
            check_digit: Some(7),
            document_type: DocumentType::Nit,
            phone: None,
            address: None,
            responsibilities: Responsibilities::O13,
            city_detail: None,
        };

        let value = serde_json::to_value(encode_client(&client, None)).unwrap();
        assert_eq!(value["isSocialReason"], true);
        assert_eq!(value["checkDigit"], 7);
        assert_eq!(value["responsibilityName"], "Gran contribuyente");
    }

    #[test]
    fn encode_injects_remote_id_for_updates() {
        let client = decode_client(raw_record()).unwrap().client;
        let value = serde_json::to_value(encode_client(&client, Some("64f0a7"))).unwrap();
        assert_eq!(value["_id"], "64f0a7");
    }

    fn raw_invoice() -> InvoiceRecord {
        serde_json::from_value(json!({
            "business": {"name": "La Tienda", "nit": "900123456-7"},
            "seller": {"name": "Ana"},
            "cashier": {"name": "Luis"},
            "sellPoint": "Mesa 4",
            "client": {
                "_id": "64f0a7",
                "name": "Julian Herrera",
                "document": 1121923074_i64,
                "idDocumentType": 13,
            },
            "createdOn": "2023-09-01T16:20:00Z",
            "prefix": "FE",
            "number": 42,
            "payments": [{"name": "Efectivo", "value": 23800.0}],
            "products": [{
                "_id": "p-77",
                "name": "Café Árabe",
                "basePrice": 10000.0,
                "totalPrice": 11900.0,
                "totalBruto": 20000.0,
                "quantity": 2,
                "taxes": [{"name": "IVA", "value": 1900.0}],
            }],
            "taxes": [{"name": "IVA", "value": 19.0, "base": 20000.0, "total": 3800.0}],
            "total": 23800.0,
        }))
        .unwrap()
    }

    #[test]
    fn invoice_decode_assembles_domain_shape() {
        let invoice = decode_invoice(raw_invoice()).unwrap();

        assert_eq!(invoice.seller.employee_id, invoice.seller.name);
        assert_eq!(invoice.cashier.employee_id, "Luis");
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.invoice_prefix, "FE");
        assert_eq!(invoice.invoice_number, 42);
        assert_eq!(invoice.payments[0].payment_name, "Efectivo");
        assert_eq!(invoice.taxes[0].base, 20000.0);

        let line = &invoice.products[0];
        assert_eq!(line.product.name, "cafe arabe");
        assert_eq!(line.gross_total, 20000.0);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.taxes[0].tax_name, "IVA");
    }

    #[test]
    fn invoice_decode_maps_cancellation() {
        let mut record = raw_invoice();
        record.status = Some("Anulada".to_string());
        record.anulated_date = Some("2023-09-02T10:00:00Z".parse().unwrap());
        let invoice = decode_invoice(record).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Canceled);
        assert!(invoice.canceled_on.is_some());
    }

    #[test]
    fn invoice_decode_fails_on_unknown_status() {
        let mut record = raw_invoice();
        record.status = Some("Pendiente".to_string());
        assert_eq!(
            decode_invoice(record).unwrap_err(),
            DecodeError::UnknownInvoiceStatus("Pendiente".to_string())
        );
    }
}
