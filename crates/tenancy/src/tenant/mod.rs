//! Tenant identity and ambient context.
//!
//! This module provides the core types for per-request tenancy: who the
//! current tenant is and where that fact lives while a request is in
//! flight.
//!
//! # Core Types
//!
//! - [`TenantContext`] - Immutable snapshot of the current tenant identity
//! - [`AccessLevel`] - Privilege hint carried alongside the identity
//! - [`current`] - Task-scoped ambient storage for the active context
//! - [`TenantIdentifierResolver`] - Session-level tenant identification seam
//!
//! # Establishing Context
//!
//! A request filter or job dispatcher resolves the tenant once and runs the
//! rest of the work inside a scope:
//!
//! ```
//! use switchyard_tenancy::tenant::{current, TenantContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = TenantContext::for_organization(42)
//!     .with_host("acme.example.com")
//!     .with_method("GET");
//!
//! current::scope(ctx, async {
//!     // Everything in here, across all await points, sees organization 42.
//!     assert_eq!(current::get().organization_id(), Some(42));
//! })
//! .await;
//! # }
//! ```
//!
//! Code that cannot run inside a scope can pass a context explicitly; every
//! entry point of the routing layer has an explicit-context variant.

mod context;
pub mod current;
mod session;

pub use context::{AccessLevel, TenantContext};
pub use session::{ContextTenantResolver, TenantIdentifierResolver};
