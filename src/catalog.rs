//! Runtime view of the schema namespace exposed by [`crate::models`].
//!
//! Each domain module publishes a static export table. The catalog is assembled
//! from those tables once per process and checked against the fixed list of
//! exported names: a module that drops, renames or adds a schema makes the
//! whole catalog fail to load instead of silently changing the public surface.

use std::any::TypeId;
use std::fmt::{self, Display, Formatter};
use std::sync::OnceLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models;

/// Domain module owning a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Auth,
    Customer,
    Asset,
    Job,
    Invoice,
}

impl Domain {
    pub const fn as_str(self) -> &'static str {
        match self {
            Domain::Auth => "auth",
            Domain::Customer => "customer",
            Domain::Asset => "asset",
            Domain::Job => "job",
            Domain::Invoice => "invoice",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Direction and purpose of a schema at the API boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaRole {
    /// Request body creating a record.
    Create,
    /// Request body partially updating a record.
    Update,
    /// Credentials submitted to sign in.
    Login,
    /// Record returned to the caller.
    Response,
}

impl Display for SchemaRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let role = match self {
            SchemaRole::Create => "create",
            SchemaRole::Update => "update",
            SchemaRole::Login => "login",
            SchemaRole::Response => "response",
        };
        f.pad(role)
    }
}

/// Implemented by every request/response record exported from [`crate::models`].
pub trait Schema: Serialize + DeserializeOwned + 'static {
    /// Exported name of the schema.
    const NAME: &'static str;
    /// Domain module defining the schema.
    const DOMAIN: Domain;
    const ROLE: SchemaRole;

    /// Runs field-level validation. Response records accept any decoded value.
    fn check(&self) -> Result<(), ValidationErrors>;
}

/// Errors raised while checking a payload against a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("payload does not decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload failed validation: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Errors raised while assembling or querying the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no schema named {0:?} is exported")]
    NameNotFound(String),

    #[error("failed to load the {domain} schema module: {detail}")]
    AggregationLoadFailure { domain: Domain, detail: String },
}

impl CatalogError {
    fn load_failure(domain: Domain, detail: impl Into<String>) -> Self {
        CatalogError::AggregationLoadFailure {
            domain,
            detail: detail.into(),
        }
    }
}

fn normalize<T: Schema>(payload: Value) -> Result<Value, SchemaError> {
    let parsed: T = serde_json::from_value(payload)?;
    parsed.check()?;
    Ok(serde_json::to_value(&parsed)?)
}

/// Type-erased handle on one exported schema type.
#[derive(Clone, Copy)]
pub struct SchemaDescriptor {
    name: &'static str,
    domain: Domain,
    role: SchemaRole,
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    normalize: fn(Value) -> Result<Value, SchemaError>,
}

impl SchemaDescriptor {
    /// Captures the metadata and type identity of `T`.
    pub const fn of<T: Schema>() -> Self {
        Self {
            name: T::NAME,
            domain: T::DOMAIN,
            role: T::ROLE,
            type_id: TypeId::of::<T>,
            type_name: std::any::type_name::<T>,
            normalize: normalize::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn role(&self) -> SchemaRole {
        self.role
    }

    /// Identity of the Rust type behind this schema.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Fully-qualified Rust path of the type, for diagnostics only.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Whether this descriptor stands for exactly the type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Decodes and validates `payload`, returning its canonical JSON form.
    pub fn normalize(&self, payload: Value) -> Result<Value, SchemaError> {
        (self.normalize)(payload)
    }

    /// Decodes and validates `payload`, discarding the result.
    pub fn check(&self, payload: Value) -> Result<(), SchemaError> {
        self.normalize(payload).map(|_| ())
    }
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("role", &self.role)
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// Export table declared by one domain module.
#[derive(Debug)]
pub struct DomainExports {
    domain: Domain,
    schemas: &'static [SchemaDescriptor],
}

impl DomainExports {
    pub const fn new(domain: Domain, schemas: &'static [SchemaDescriptor]) -> Self {
        Self { domain, schemas }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn schemas(&self) -> &'static [SchemaDescriptor] {
        self.schemas
    }
}

/// Public schema surface, in declaration order, grouped by owning domain.
static EXPORTED: [(Domain, &str); 20] = [
    (Domain::Auth, "UserCreate"),
    (Domain::Auth, "UserLogin"),
    (Domain::Auth, "UserResponse"),
    (Domain::Customer, "CustomerCreate"),
    (Domain::Customer, "CustomerResponse"),
    (Domain::Customer, "SiteCreate"),
    (Domain::Customer, "SiteResponse"),
    (Domain::Asset, "AssetCreate"),
    (Domain::Asset, "AssetResponse"),
    (Domain::Job, "JobCreate"),
    (Domain::Job, "JobUpdate"),
    (Domain::Job, "JobResponse"),
    (Domain::Job, "ChecklistItemCreate"),
    (Domain::Job, "JobCompletionCreate"),
    (Domain::Invoice, "QuoteCreate"),
    (Domain::Invoice, "QuoteResponse"),
    (Domain::Invoice, "InvoiceCreate"),
    (Domain::Invoice, "InvoiceResponse"),
    (Domain::Invoice, "PartCreate"),
    (Domain::Invoice, "PartResponse"),
];

/// Names of every exported schema, in declaration order.
pub fn list_exported() -> Vec<&'static str> {
    EXPORTED.iter().map(|(_, name)| *name).collect()
}

/// The assembled, verified set of exported schemas.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<&'static SchemaDescriptor>,
}

impl Catalog {
    /// Builds the catalog from domain export tables, failing if any table
    /// deviates from the declared public surface.
    pub fn assemble(modules: &[&'static DomainExports]) -> Result<Self, CatalogError> {
        for (index, module) in modules.iter().enumerate() {
            let domain = module.domain();

            if modules[..index].iter().any(|m| m.domain() == domain) {
                return Err(CatalogError::load_failure(domain, "module loaded twice"));
            }

            for schema in module.schemas() {
                if schema.domain() != domain {
                    return Err(CatalogError::load_failure(
                        domain,
                        format!("{} is owned by the {} module", schema.name(), schema.domain()),
                    ));
                }
                if !EXPORTED.contains(&(domain, schema.name())) {
                    return Err(CatalogError::load_failure(
                        domain,
                        format!("unexpected export {}", schema.name()),
                    ));
                }
            }

            let expected = EXPORTED.iter().filter(|(d, _)| *d == domain).count();
            if module.schemas().len() != expected {
                return Err(CatalogError::load_failure(
                    domain,
                    format!(
                        "exports {} schemas, expected {expected}",
                        module.schemas().len()
                    ),
                ));
            }
        }

        let mut entries = Vec::with_capacity(EXPORTED.len());
        for (domain, name) in &EXPORTED {
            let module = modules
                .iter()
                .find(|m| m.domain() == *domain)
                .ok_or_else(|| CatalogError::load_failure(*domain, "module not loaded"))?;
            let schema = module
                .schemas()
                .iter()
                .find(|s| s.name() == *name)
                .ok_or_else(|| CatalogError::load_failure(*domain, format!("does not define {name}")))?;
            entries.push(schema);
        }

        log::debug!("Assembled schema catalog with {} entries", entries.len());

        Ok(Self { entries })
    }

    /// Looks up an exported schema by name.
    pub fn resolve(&self, name: &str) -> Result<&'static SchemaDescriptor, CatalogError> {
        self.entries
            .iter()
            .copied()
            .find(|schema| schema.name() == name)
            .ok_or_else(|| CatalogError::NameNotFound(name.to_string()))
    }

    /// Exported names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|schema| schema.name())
    }

    pub fn descriptors(&self) -> &[&'static SchemaDescriptor] {
        &self.entries
    }

    /// Schemas owned by one domain module.
    pub fn by_domain(&self, domain: Domain) -> impl Iterator<Item = &'static SchemaDescriptor> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(move |schema| schema.domain() == domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CATALOG: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// Returns the process-wide catalog, assembling it on first use.
///
/// A load failure is sticky: every call after it returns the same error.
pub fn load() -> Result<&'static Catalog, CatalogError> {
    CATALOG
        .get_or_init(|| {
            let assembled = Catalog::assemble(&models::DOMAIN_MODULES);
            if let Err(err) = &assembled {
                log::error!("Schema catalog failed to load: {err}");
            }
            assembled
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Resolves an exported schema by name from the process-wide catalog.
pub fn resolve(name: &str) -> Result<&'static SchemaDescriptor, CatalogError> {
    load()?.resolve(name)
}
