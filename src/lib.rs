//! Request and response schemas for the refrigeration field-service API.
//!
//! [`models`] is the single import path for every schema. [`catalog`] exposes
//! the same set at runtime, looked up by name, and [`checker`] validates JSON
//! payload files against it.

pub mod catalog;
pub mod checker;
pub mod config;
pub mod domain;
pub mod models;

pub use catalog::{CatalogError, Schema, SchemaError, list_exported, resolve};
