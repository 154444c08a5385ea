pub mod client;
pub mod invoice;
pub mod product;

pub use client::{CityDetail, Client, DocumentType, Responsibilities};
pub use invoice::{
    Business, Employee, Invoice, InvoiceProduct, InvoiceStatus, InvoiceTax, Payment,
};
pub use product::{Product, ProductTaxInfo};
