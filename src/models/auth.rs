//! Account registration, sign-in and user profile schemas.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::{Domain, DomainExports, SchemaDescriptor};
use crate::domain::fields;
use crate::domain::types::{EmailAddress, PersonName, PhoneNumber, UserId};
use crate::domain::user::UserRole;

/// Registration payload for a new staff account.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    pub email: EmailAddress,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub name: PersonName,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub phone: Option<PhoneNumber>,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Credentials submitted on the sign-in form.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct UserLogin {
    pub email: EmailAddress,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn active_by_default() -> bool {
    true
}

/// Public view of a user account. Never carries credentials.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: PersonName,
    pub role: UserRole,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub phone: Option<PhoneNumber>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

schema!(UserCreate, Auth, Create, validated);
schema!(UserLogin, Auth, Login, validated);
schema!(UserResponse, Auth, Response);

static SCHEMAS: [SchemaDescriptor; 3] = [
    SchemaDescriptor::of::<UserCreate>(),
    SchemaDescriptor::of::<UserLogin>(),
    SchemaDescriptor::of::<UserResponse>(),
];

/// Schemas published by the auth module.
pub static EXPORTS: DomainExports = DomainExports::new(Domain::Auth, &SCHEMAS);
