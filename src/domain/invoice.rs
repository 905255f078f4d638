//! Billing records shared by quote and invoice schemas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::types::FreeText;

wire_enum! {
    /// Lifecycle of a quote sent to a customer.
    #[derive(Default)]
    pub enum QuoteStatus {
        #[default]
        Draft => "draft",
        Sent => "sent",
        Accepted => "accepted",
        Declined => "declined",
        Expired => "expired",
    }
}

wire_enum! {
    /// Lifecycle of an issued invoice.
    #[derive(Default)]
    pub enum InvoiceStatus {
        #[default]
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
        Void => "void",
    }
}

/// Rejects negative money amounts.
pub fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

/// Requires a strictly positive quantity.
pub fn positive_quantity(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(ValidationError::new("non_positive_quantity"));
    }
    Ok(())
}

/// VAT rate expressed as a percentage between 0 and 100.
pub fn vat_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if (value.is_sign_negative() && !value.is_zero()) || *value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("vat_rate_out_of_range"));
    }
    Ok(())
}

/// Standard UK VAT rate applied when a payload omits one.
pub fn default_vat_rate() -> Decimal {
    Decimal::from(20)
}

/// One priced line on a quote or invoice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate)]
pub struct LineItem {
    pub description: FreeText,
    #[validate(custom(function = "positive_quantity"))]
    pub quantity: Decimal,
    #[validate(custom(function = "non_negative_amount"))]
    pub unit_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: &str, unit_price: &str) -> LineItem {
        LineItem {
            description: FreeText::new("R404A top-up").unwrap(),
            quantity: quantity.parse().unwrap(),
            unit_price: unit_price.parse().unwrap(),
        }
    }

    #[test]
    fn line_item_amounts() {
        assert!(line("2", "45.50").validate().is_ok());
        assert!(line("1", "0").validate().is_ok());
        assert!(line("0", "10").validate().is_err());
        assert!(line("1", "-0.01").validate().is_err());
    }

    #[test]
    fn vat_rate_bounds() {
        assert!(vat_percentage(&default_vat_rate()).is_ok());
        assert!(vat_percentage(&Decimal::ZERO).is_ok());
        assert!(vat_percentage(&Decimal::from(101)).is_err());
        assert!(vat_percentage(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn decimals_accept_strings_and_numbers() {
        let from_str: LineItem = serde_json::from_str(
            r#"{"description": "Labour", "quantity": "1.5", "unit_price": "60.00"}"#,
        )
        .unwrap();
        let from_num: LineItem = serde_json::from_str(
            r#"{"description": "Labour", "quantity": 1.5, "unit_price": 60}"#,
        )
        .unwrap();
        assert_eq!(from_str.quantity, from_num.quantity);
        assert_eq!(from_str.unit_price, from_num.unit_price);
    }

    #[test]
    fn statuses_default_to_draft() {
        assert_eq!(QuoteStatus::default(), QuoteStatus::Draft);
        assert_eq!(InvoiceStatus::default().to_string(), "draft");
        assert_eq!("void".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Void);
    }
}
