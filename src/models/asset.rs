//! Schemas for refrigeration and cooling equipment installed at customer sites.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::catalog::{Domain, DomainExports, SchemaDescriptor};
use crate::domain::fields;
use crate::domain::types::{AssetId, AssetName, CustomerId, FreeText, SiteId};

/// Service interval applied when a payload does not specify one.
pub const DEFAULT_PM_INTERVAL_MONTHS: u32 = 6;

fn default_pm_interval() -> u32 {
    DEFAULT_PM_INTERVAL_MONTHS
}

fn service_dates_in_order(asset: &AssetCreate) -> Result<(), ValidationError> {
    if let (Some(installed), Some(serviced)) = (asset.install_date, asset.last_pm_date)
        && serviced < installed
    {
        return Err(ValidationError::new("last_pm_before_install"));
    }
    Ok(())
}

/// Payload registering an asset on a site.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "service_dates_in_order", skip_on_field_errors = false))]
pub struct AssetCreate {
    pub customer_id: CustomerId,
    pub site_id: SiteId,
    pub name: AssetName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub asset_type: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub make: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub model: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub serial_number: Option<FreeText>,
    /// Refrigerant designation, e.g. `R404A`.
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub refrigerant_type: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub install_date: Option<NaiveDate>,
    #[serde(default = "default_pm_interval")]
    #[validate(range(min = 1, max = 60))]
    pub pm_interval_months: u32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub last_pm_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssetResponse {
    pub id: AssetId,
    pub customer_id: CustomerId,
    pub site_id: SiteId,
    pub name: AssetName,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub asset_type: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub make: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub model: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub serial_number: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub refrigerant_type: Option<FreeText>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub install_date: Option<NaiveDate>,
    pub pm_interval_months: u32,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub last_pm_date: Option<NaiveDate>,
    /// Date the next planned maintenance visit falls due, when known.
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub next_pm_due: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
    pub created_at: DateTime<Utc>,
}

schema!(AssetCreate, Asset, Create, validated);
schema!(AssetResponse, Asset, Response);

static SCHEMAS: [SchemaDescriptor; 2] = [
    SchemaDescriptor::of::<AssetCreate>(),
    SchemaDescriptor::of::<AssetResponse>(),
];

/// Schemas published by the asset module.
pub static EXPORTS: DomainExports = DomainExports::new(Domain::Asset, &SCHEMAS);

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn payload() -> Value {
        json!({
            "customer_id": "0b5c7d4e-1f2a-4b3c-8d9e-0f1a2b3c4d5e",
            "site_id": "6a1e2b3c-4d5e-4f60-8a1b-2c3d4e5f6071",
            "name": "Cold room 2 condensing unit",
            "make": "Daikin",
            "serial_number": "",
            "refrigerant_type": "R449A",
            "install_date": "2019-06-14"
        })
    }

    #[test]
    fn defaults_to_six_month_interval() {
        let asset: AssetCreate = serde_json::from_value(payload()).unwrap();
        assert_eq!(asset.pm_interval_months, DEFAULT_PM_INTERVAL_MONTHS);
        assert_eq!(asset.serial_number, None);
        assert_eq!(asset.install_date, NaiveDate::from_ymd_opt(2019, 6, 14));
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn interval_out_of_range() {
        let mut value = payload();
        value["pm_interval_months"] = json!(0);
        let asset: AssetCreate = serde_json::from_value(value).unwrap();
        let errors = asset.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("pm_interval_months"));
    }

    #[test]
    fn service_cannot_predate_install() {
        let mut value = payload();
        value["last_pm_date"] = json!("2018-01-01");
        let asset: AssetCreate = serde_json::from_value(value).unwrap();
        assert!(asset.validate().is_err());
    }

    #[test]
    fn malformed_dates_do_not_decode() {
        let mut value = payload();
        value["install_date"] = json!("14/06/2019");
        assert!(serde_json::from_value::<AssetCreate>(value).is_err());
    }
}
