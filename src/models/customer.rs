//! Customer and site schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Domain, DomainExports, SchemaDescriptor};
use crate::domain::fields;
use crate::domain::types::{
    CompanyName, CustomerId, EmailAddress, FreeText, PersonName, PhoneNumber, SiteId, SiteName,
};

/// Payload creating or replacing a customer account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerCreate {
    pub company_name: CompanyName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub billing_address: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub phone: Option<PhoneNumber>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub email: Option<EmailAddress>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub company_name: CompanyName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub billing_address: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub phone: Option<PhoneNumber>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub email: Option<EmailAddress>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
    pub created_at: DateTime<Utc>,
}

/// Payload creating or replacing a site belonging to a customer.
///
/// Access details are what an engineer needs on arrival: where the keys are,
/// when the premises are open and who to ask for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SiteCreate {
    pub customer_id: CustomerId,
    pub name: SiteName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub address: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub access_notes: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub key_location: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub opening_hours: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub contact_name: Option<PersonName>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub contact_phone: Option<PhoneNumber>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SiteResponse {
    pub id: SiteId,
    pub customer_id: CustomerId,
    pub name: SiteName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub address: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub access_notes: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub key_location: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub opening_hours: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub contact_name: Option<PersonName>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub contact_phone: Option<PhoneNumber>,
    pub created_at: DateTime<Utc>,
}

schema!(CustomerCreate, Customer, Create);
schema!(CustomerResponse, Customer, Response);
schema!(SiteCreate, Customer, Create);
schema!(SiteResponse, Customer, Response);

static SCHEMAS: [SchemaDescriptor; 4] = [
    SchemaDescriptor::of::<CustomerCreate>(),
    SchemaDescriptor::of::<CustomerResponse>(),
    SchemaDescriptor::of::<SiteCreate>(),
    SchemaDescriptor::of::<SiteResponse>(),
];

/// Schemas published by the customer module.
pub static EXPORTS: DomainExports = DomainExports::new(Domain::Customer, &SCHEMAS);
