//! Quote, invoice and parts catalogue schemas.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::{Domain, DomainExports, SchemaDescriptor};
use crate::domain::fields;
use crate::domain::invoice::{
    InvoiceStatus, LineItem, QuoteStatus, default_vat_rate, non_negative_amount, vat_percentage,
};
use crate::domain::types::{
    CustomerId, FreeText, InvoiceId, JobId, PartId, PartName, PartNumber, QuoteId, SiteId,
};

fn default_valid_days() -> u32 {
    30
}

fn default_payment_terms() -> u32 {
    30
}

/// Payload drafting a quote for a customer.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
pub struct QuoteCreate {
    pub customer_id: CustomerId,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub site_id: Option<SiteId>,
    /// Survey or breakdown visit the quote follows up on.
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub job_id: Option<JobId>,
    #[validate(length(min = 1, max = 200), nested)]
    pub line_items: Vec<LineItem>,
    /// Percentage, `20` for standard rate.
    #[serde(default = "default_vat_rate")]
    #[validate(custom(function = "vat_percentage"))]
    pub vat_rate: Decimal,
    #[serde(default = "default_valid_days")]
    #[validate(range(min = 1, max = 365))]
    pub valid_days: u32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuoteResponse {
    pub id: QuoteId,
    pub quote_number: String,
    pub customer_id: CustomerId,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub site_id: Option<SiteId>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub job_id: Option<JobId>,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub status: QuoteStatus,
    pub valid_until: NaiveDate,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
    pub created_at: DateTime<Utc>,
}

/// Payload raising an invoice, usually from a completed job or accepted quote.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
pub struct InvoiceCreate {
    pub customer_id: CustomerId,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub job_id: Option<JobId>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub quote_id: Option<QuoteId>,
    #[validate(length(min = 1, max = 200), nested)]
    pub line_items: Vec<LineItem>,
    #[serde(default = "default_vat_rate")]
    #[validate(custom(function = "vat_percentage"))]
    pub vat_rate: Decimal,
    /// Days after issue the invoice falls due. Zero means due on receipt.
    #[serde(default = "default_payment_terms")]
    #[validate(range(max = 120))]
    pub payment_terms_days: u32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub customer_id: CustomerId,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub job_id: Option<JobId>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub quote_id: Option<QuoteId>,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Stock item in the parts catalogue.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
pub struct PartCreate {
    pub part_number: PartNumber,
    pub name: PartName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub description: Option<FreeText>,
    #[validate(custom(function = "non_negative_amount"))]
    pub cost_price: Decimal,
    #[validate(custom(function = "non_negative_amount"))]
    pub sell_price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub min_stock_level: i32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub supplier: Option<FreeText>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartResponse {
    pub id: PartId,
    pub part_number: PartNumber,
    pub name: PartName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub description: Option<FreeText>,
    pub cost_price: Decimal,
    pub sell_price: Decimal,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub supplier: Option<FreeText>,
    pub created_at: DateTime<Utc>,
}

schema!(QuoteCreate, Invoice, Create, validated);
schema!(QuoteResponse, Invoice, Response);
schema!(InvoiceCreate, Invoice, Create, validated);
schema!(InvoiceResponse, Invoice, Response);
schema!(PartCreate, Invoice, Create, validated);
schema!(PartResponse, Invoice, Response);

static SCHEMAS: [SchemaDescriptor; 6] = [
    SchemaDescriptor::of::<QuoteCreate>(),
    SchemaDescriptor::of::<QuoteResponse>(),
    SchemaDescriptor::of::<InvoiceCreate>(),
    SchemaDescriptor::of::<InvoiceResponse>(),
    SchemaDescriptor::of::<PartCreate>(),
    SchemaDescriptor::of::<PartResponse>(),
];

/// Schemas published by the invoice module.
pub static EXPORTS: DomainExports = DomainExports::new(Domain::Invoice, &SCHEMAS);
