use std::thread;

use fieldservice_models::catalog::{
    self, Catalog, CatalogError, Domain, DomainExports, Schema, SchemaDescriptor, SchemaRole,
};
use fieldservice_models::models;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

const EXPECTED: [&str; 20] = [
    "UserCreate",
    "UserLogin",
    "UserResponse",
    "CustomerCreate",
    "CustomerResponse",
    "SiteCreate",
    "SiteResponse",
    "AssetCreate",
    "AssetResponse",
    "JobCreate",
    "JobUpdate",
    "JobResponse",
    "ChecklistItemCreate",
    "JobCompletionCreate",
    "QuoteCreate",
    "QuoteResponse",
    "InvoiceCreate",
    "InvoiceResponse",
    "PartCreate",
    "PartResponse",
];

macro_rules! assert_resolves_to {
    ($($module:ident :: $ty:ident),+ $(,)?) => {
        $(
            let schema = catalog::resolve(stringify!($ty)).unwrap();
            assert!(schema.is::<models::$ty>(), "{} resolved to {}", stringify!($ty), schema.type_name());
            assert!(schema.is::<models::$module::$ty>());
            assert_eq!(schema.domain(), <models::$ty as Schema>::DOMAIN);
        )+
    };
}

#[test]
fn test_every_name_resolves_to_its_defining_type() {
    assert_resolves_to!(
        auth::UserCreate,
        auth::UserLogin,
        auth::UserResponse,
        customer::CustomerCreate,
        customer::CustomerResponse,
        customer::SiteCreate,
        customer::SiteResponse,
        asset::AssetCreate,
        asset::AssetResponse,
        job::JobCreate,
        job::JobUpdate,
        job::JobResponse,
        job::ChecklistItemCreate,
        job::JobCompletionCreate,
        invoice::QuoteCreate,
        invoice::QuoteResponse,
        invoice::InvoiceCreate,
        invoice::InvoiceResponse,
        invoice::PartCreate,
        invoice::PartResponse,
    );
}

#[test]
fn test_list_exported_order() {
    assert_eq!(catalog::list_exported(), EXPECTED);

    let loaded = catalog::load().unwrap();
    assert_eq!(loaded.len(), EXPECTED.len());
    assert!(loaded.names().eq(EXPECTED));
}

#[test]
fn test_schemas_grouped_by_domain() {
    let loaded = catalog::load().unwrap();
    let counts: Vec<usize> = [
        Domain::Auth,
        Domain::Customer,
        Domain::Asset,
        Domain::Job,
        Domain::Invoice,
    ]
    .into_iter()
    .map(|domain| loaded.by_domain(domain).count())
    .collect();
    assert_eq!(counts, [3, 4, 2, 5, 6]);

    let job_update = catalog::resolve("JobUpdate").unwrap();
    assert_eq!(job_update.role(), SchemaRole::Update);
    assert_eq!(catalog::resolve("UserLogin").unwrap().role(), SchemaRole::Login);
}

#[test]
fn test_unknown_name_is_not_found() {
    for name in ["Foo", "", "jobcreate", "LineItem", "ChecklistItem"] {
        assert_eq!(
            catalog::resolve(name).unwrap_err(),
            CatalogError::NameNotFound(name.to_string())
        );
    }
}

#[test]
fn test_load_is_idempotent() {
    let first = catalog::load().unwrap();
    let second = catalog::load().unwrap();
    assert!(std::ptr::eq(first, second));

    let from_threads: Vec<usize> = (0..8)
        .map(|_| thread::spawn(|| catalog::load().unwrap() as *const Catalog as usize))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(
        from_threads
            .iter()
            .all(|addr| *addr == first as *const Catalog as usize)
    );

    let a = catalog::resolve("AssetCreate").unwrap();
    let b = catalog::resolve("AssetCreate").unwrap();
    assert!(std::ptr::eq(a, b));
}

#[derive(Serialize, Deserialize)]
struct UserCreated {
    email: String,
}

impl Schema for UserCreated {
    const NAME: &'static str = "UserCreated";
    const DOMAIN: Domain = Domain::Auth;
    const ROLE: SchemaRole = SchemaRole::Create;

    fn check(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

static RENAMED_AUTH_SCHEMAS: [SchemaDescriptor; 3] = [
    SchemaDescriptor::of::<UserCreated>(),
    SchemaDescriptor::of::<models::UserLogin>(),
    SchemaDescriptor::of::<models::UserResponse>(),
];

static RENAMED_AUTH: DomainExports = DomainExports::new(Domain::Auth, &RENAMED_AUTH_SCHEMAS);

static SHORT_AUTH_SCHEMAS: [SchemaDescriptor; 2] = [
    SchemaDescriptor::of::<models::UserLogin>(),
    SchemaDescriptor::of::<models::UserResponse>(),
];

static SHORT_AUTH: DomainExports = DomainExports::new(Domain::Auth, &SHORT_AUTH_SCHEMAS);

static MISFILED_SCHEMAS: [SchemaDescriptor; 2] = [
    SchemaDescriptor::of::<models::AssetCreate>(),
    SchemaDescriptor::of::<models::JobCreate>(),
];

static MISFILED_ASSET: DomainExports = DomainExports::new(Domain::Asset, &MISFILED_SCHEMAS);

fn assert_load_failure(result: Result<Catalog, CatalogError>, expected: Domain) {
    match result {
        Err(CatalogError::AggregationLoadFailure { domain, .. }) => assert_eq!(domain, expected),
        other => panic!("expected a load failure for {expected}, got {other:?}"),
    }
}

#[test]
fn test_renamed_schema_fails_assembly() {
    let modules = [
        &RENAMED_AUTH,
        &models::customer::EXPORTS,
        &models::asset::EXPORTS,
        &models::job::EXPORTS,
        &models::invoice::EXPORTS,
    ];
    let result = Catalog::assemble(&modules);
    assert_load_failure(result, Domain::Auth);

    // The published surface is not reduced by a broken table.
    assert!(catalog::list_exported().contains(&"UserCreate"));
    assert!(catalog::resolve("UserCreate").is_ok());
}

#[test]
fn test_missing_schema_fails_assembly() {
    let modules = [
        &SHORT_AUTH,
        &models::customer::EXPORTS,
        &models::asset::EXPORTS,
        &models::job::EXPORTS,
        &models::invoice::EXPORTS,
    ];
    assert_load_failure(Catalog::assemble(&modules), Domain::Auth);
}

#[test]
fn test_misfiled_schema_fails_assembly() {
    let modules = [
        &models::auth::EXPORTS,
        &models::customer::EXPORTS,
        &MISFILED_ASSET,
        &models::job::EXPORTS,
        &models::invoice::EXPORTS,
    ];
    assert_load_failure(Catalog::assemble(&modules), Domain::Asset);
}

#[test]
fn test_missing_or_duplicate_module_fails_assembly() {
    assert_load_failure(
        Catalog::assemble(&models::DOMAIN_MODULES[..4]),
        Domain::Invoice,
    );

    let duplicated = [
        &models::auth::EXPORTS,
        &models::customer::EXPORTS,
        &models::asset::EXPORTS,
        &models::job::EXPORTS,
        &models::job::EXPORTS,
    ];
    assert_load_failure(Catalog::assemble(&duplicated), Domain::Job);
}

#[test]
fn test_assembly_from_domain_modules() {
    let assembled = Catalog::assemble(&models::DOMAIN_MODULES).unwrap();
    assert!(assembled.names().eq(EXPECTED));
    assert!(!assembled.is_empty());
}

#[test]
fn test_load_failure_message_names_domain() {
    let err = Catalog::assemble(&[&SHORT_AUTH]).unwrap_err();
    assert!(err.to_string().contains("auth"));
}
