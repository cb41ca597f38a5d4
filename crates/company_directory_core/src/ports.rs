//! crates/company_directory_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete document store.

use async_trait::async_trait;

use crate::domain::{Company, CompanyData, CompanyPatch};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors raised by the store driver.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persistence for company records. Every method is a single store call.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// All records in the store's natural order.
    async fn list_companies(&self) -> PortResult<Vec<Company>>;

    async fn get_company_by_email(&self, email: &str) -> PortResult<Company>;

    async fn email_exists(&self, email: &str) -> PortResult<bool>;

    /// Inserts a new record and returns its identifier.
    async fn insert_company(&self, data: CompanyData) -> PortResult<String>;

    /// Writes only the attributes present in `patch`. Moving the record to an
    /// email another record already holds fails with `Conflict`.
    async fn patch_company(&self, email: &str, patch: CompanyPatch) -> PortResult<()>;

    async fn delete_company(&self, email: &str) -> PortResult<()>;

    /// Fails with `InvalidIdentifier` when `id` is not in the store's identifier format.
    async fn set_password(&self, id: &str, password: &str) -> PortResult<()>;

    /// Exact match on both email and password.
    async fn find_by_credentials(&self, email: &str, password: &str) -> PortResult<Company>;
}
