//! Request and response schemas of the field-service API, under one path.
//!
//! Consumers import from here rather than from the individual domain modules.
//! The names below are plain re-exports: `models::JobCreate` is the very same
//! type as `models::job::JobCreate`.

use crate::catalog::DomainExports;

/// Implements [`crate::catalog::Schema`] for a record, naming it after the type.
macro_rules! schema {
    ($ty:ident, $domain:ident, $role:ident) => {
        impl $crate::catalog::Schema for $ty {
            const NAME: &'static str = stringify!($ty);
            const DOMAIN: $crate::catalog::Domain = $crate::catalog::Domain::$domain;
            const ROLE: $crate::catalog::SchemaRole = $crate::catalog::SchemaRole::$role;

            fn check(&self) -> Result<(), validator::ValidationErrors> {
                Ok(())
            }
        }
    };
    ($ty:ident, $domain:ident, $role:ident, validated) => {
        impl $crate::catalog::Schema for $ty {
            const NAME: &'static str = stringify!($ty);
            const DOMAIN: $crate::catalog::Domain = $crate::catalog::Domain::$domain;
            const ROLE: $crate::catalog::SchemaRole = $crate::catalog::SchemaRole::$role;

            fn check(&self) -> Result<(), validator::ValidationErrors> {
                validator::Validate::validate(self)
            }
        }
    };
}

pub mod asset;
pub mod auth;
pub mod customer;
pub mod invoice;
pub mod job;

pub use asset::{AssetCreate, AssetResponse};
pub use auth::{UserCreate, UserLogin, UserResponse};
pub use customer::{CustomerCreate, CustomerResponse, SiteCreate, SiteResponse};
pub use invoice::{
    InvoiceCreate, InvoiceResponse, PartCreate, PartResponse, QuoteCreate, QuoteResponse,
};
pub use job::{ChecklistItemCreate, JobCompletionCreate, JobCreate, JobResponse, JobUpdate};

/// Export tables of the domain modules aggregated here.
pub static DOMAIN_MODULES: [&DomainExports; 5] = [
    &auth::EXPORTS,
    &customer::EXPORTS,
    &asset::EXPORTS,
    &job::EXPORTS,
    &invoice::EXPORTS,
];
