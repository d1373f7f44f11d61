//! Error types for the tenancy layer.
//!
//! This module defines all error types used throughout the tenancy layer,
//! following a hierarchy that separates tenant identity errors, connection
//! routing errors, and unit-of-work execution errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all tenancy operations.
///
/// Each variant wraps the error type of one subsystem, so callers can match
/// on the failing layer without losing the underlying cause.
#[derive(Error, Debug)]
pub enum TenancyError {
    /// Tenant identity and schema naming errors
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Connection acquisition and release errors
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Unit-of-work execution errors
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

/// Errors related to tenant identity and schema naming.
#[derive(Error, Debug)]
pub enum TenantError {
    /// The schema name derived from the tenant context is not usable.
    #[error("invalid schema name '{schema}': {reason}")]
    InvalidSchemaName { schema: String, reason: String },

    /// The configured schema name pattern is not a valid regex.
    #[error("invalid schema pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A context mutation was requested on a task with no ambient scope.
    #[error("no ambient tenant scope on the current task")]
    NoAmbientScope,

    /// The context selected a datasource index that is not configured.
    #[error("datasource index {index} out of range: {available} datasource(s) configured")]
    DatasourceOutOfRange { index: usize, available: usize },
}

/// Errors related to connection acquisition and release.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Checking a connection out of the pool failed.
    #[error("connection acquisition failed: {message}")]
    AcquireFailed { message: String },

    /// The pool itself is unusable (closed or exhausted).
    #[error("connection pool unavailable: {message}")]
    Unavailable { message: String },

    /// The search path directive could not be applied after checkout.
    #[error("failed to scope connection to schema '{schema}': {message}")]
    ScopeFailed { schema: String, message: String },

    /// The search path could not be restored before pool return.
    ///
    /// The affected connection has been discarded rather than returned.
    #[error("failed to reset search path (connection discarded): {message}")]
    ResetFailed { message: String },
}

/// Errors raised while executing units of work.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Opening a transaction failed.
    #[error("failed to begin transaction: {message}")]
    BeginFailed { message: String },

    /// Committing a transaction failed.
    #[error("failed to commit transaction: {message}")]
    CommitFailed { message: String },

    /// Rolling back a transaction failed.
    #[error("failed to roll back transaction: {message}")]
    RollbackFailed { message: String },

    /// One statement of a batch failed.
    #[error("statement {index} of {total} failed: {message}")]
    StatementFailed {
        index: usize,
        total: usize,
        message: String,
    },

    /// A script file could not be read.
    #[error("failed to read script '{path}': {message}")]
    ScriptRead { path: String, message: String },

    /// A query failed outside of any batch bookkeeping.
    #[error("query execution failed: {message}")]
    QueryFailed { message: String },
}

/// Result type alias for tenancy operations.
pub type TenancyResult<T> = Result<T, TenancyError>;

// Implement conversions from driver error types

impl From<tokio_postgres::Error> for TenancyError {
    fn from(err: tokio_postgres::Error) -> Self {
        TenancyError::Executor(ExecutorError::QueryFailed {
            message: err.to_string(),
        })
    }
}

impl From<deadpool_postgres::PoolError> for TenancyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        TenancyError::Pool(PoolError::AcquireFailed {
            message: err.to_string(),
        })
    }
}
