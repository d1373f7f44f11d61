//! Session-level tenant identification.
//!
//! Session-caching layers need a stable string key for "which tenant does
//! this session belong to" so they can partition caches and decide whether a
//! pooled session may be reused. [`TenantIdentifierResolver`] is that seam;
//! [`ContextTenantResolver`] answers it from the ambient tenant context.

use super::current;

/// Resolves the tenant identifier of the current session.
///
/// Implementations must be synchronous and side-effect-free: resolution runs
/// on every session checkout.
pub trait TenantIdentifierResolver: Send + Sync {
    /// Returns the identifier of the tenant the current work belongs to.
    fn resolve_current_tenant_identifier(&self) -> String;

    /// Returns whether an existing session may only be reused when its
    /// original tenant identifier still matches the current one.
    fn validate_existing_sessions(&self) -> bool;
}

/// [`TenantIdentifierResolver`] backed by the ambient tenant context.
///
/// The identifier is the decimal rendering of
/// [`TenantContext::identity_hash`](super::TenantContext::identity_hash),
/// so contexts that are the same tenant under the restricted equality rules
/// always produce the same identifier within a process run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextTenantResolver;

impl ContextTenantResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }
}

impl TenantIdentifierResolver for ContextTenantResolver {
    fn resolve_current_tenant_identifier(&self) -> String {
        current::get().identity_hash().to_string()
    }

    /// Always `false`: a session may switch tenant context over its lifetime
    /// (administrative impersonation, background jobs iterating tenants), so
    /// reuse is not tied to the identifier the session started with.
    fn validate_existing_sessions(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::{AccessLevel, TenantContext};

    #[tokio::test]
    async fn test_identifier_ignores_access_level_and_datasource() {
        let resolver = ContextTenantResolver::new();
        let base = TenantContext::for_organization(42)
            .with_host("acme.example.com")
            .with_method("GET");

        let plain = current::scope(base.clone(), async {
            resolver.resolve_current_tenant_identifier()
        })
        .await;

        let elevated = current::scope(
            base.with_access_level(AccessLevel::Admin).with_datasource(1),
            async { resolver.resolve_current_tenant_identifier() },
        )
        .await;

        assert_eq!(plain, elevated);
    }

    #[tokio::test]
    async fn test_identifier_differs_across_organizations() {
        let resolver = ContextTenantResolver::new();

        let a = current::scope(TenantContext::for_organization(1), async {
            resolver.resolve_current_tenant_identifier()
        })
        .await;
        let b = current::scope(TenantContext::for_organization(2), async {
            resolver.resolve_current_tenant_identifier()
        })
        .await;

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_identifier_outside_scope_is_the_sentinel_identifier() {
        let resolver = ContextTenantResolver::new();
        let unscoped = resolver.resolve_current_tenant_identifier();
        assert_eq!(unscoped, TenantContext::none().identity_hash().to_string());
    }

    #[test]
    fn test_sessions_are_not_invalidated_on_tenant_switch() {
        let resolver = ContextTenantResolver::new();
        assert!(!resolver.validate_existing_sessions());
    }

    #[test]
    fn test_resolver_is_object_safe() {
        let resolver: Box<dyn TenantIdentifierResolver> = Box::new(ContextTenantResolver::new());
        assert!(!resolver.resolve_current_tenant_identifier().is_empty());
    }
}
