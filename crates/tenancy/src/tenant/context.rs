//! Tenant context for routed operations.
//!
//! This module defines [`TenantContext`], the immutable value describing which
//! tenant a unit of work belongs to. The routing layer derives the target
//! schema from it, the session layer derives the tenant identifier from it.

use std::hash::{DefaultHasher, Hash, Hasher};

/// The tenant identity of the current unit of work.
///
/// A context is a snapshot: once placed in the ambient store it is never
/// mutated, only replaced. The builder methods consume and return the value,
/// so deriving a variant of an existing context is explicit.
///
/// # Identity
///
/// Two contexts are the same tenant when their `organization_id`, `host`,
/// `entity_key` and `method` agree. [`AccessLevel`] and the datasource
/// override deliberately do not participate in equality or hashing: a tenant
/// must keep one stable identity whether a request arrived with elevated
/// privileges or was pinned to a replica.
///
/// ```
/// use switchyard_tenancy::tenant::{AccessLevel, TenantContext};
///
/// let a = TenantContext::for_organization(42).with_host("acme.example.com");
/// let b = a.clone().with_access_level(AccessLevel::Admin).with_datasource(1);
/// assert_eq!(a, b);
/// assert_eq!(a.identity_hash(), b.identity_hash());
/// ```
///
/// # The no-tenant sentinel
///
/// Absence of tenant identity is represented by a value, not by an option:
///
/// ```
/// use switchyard_tenancy::tenant::TenantContext;
///
/// let none = TenantContext::none();
/// assert!(none.is_none());
/// assert_eq!(none.organization_id(), None);
/// ```
///
/// Work running under the sentinel is routed to the shared schema only.
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// The owning organization, `None` for the no-tenant sentinel.
    organization_id: Option<i32>,
    /// Originating request host.
    host: Option<String>,
    /// Resource discriminator for entity-scoped requests.
    entity_key: Option<String>,
    /// Request method, used as a read/write routing hint.
    method: Option<String>,
    /// Privilege hint; not part of the tenant identity.
    access_level: AccessLevel,
    /// Explicit datasource override; not part of the tenant identity.
    datasource: Option<usize>,
}

/// Privilege hint carried alongside the tenant identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    /// Unauthenticated access.
    #[default]
    Public,
    /// Authenticated end user.
    User,
    /// Organization administrator.
    Admin,
    /// Internal platform operations.
    System,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::Public => write!(f, "public"),
            AccessLevel::User => write!(f, "user"),
            AccessLevel::Admin => write!(f, "admin"),
            AccessLevel::System => write!(f, "system"),
        }
    }
}

impl TenantContext {
    /// Creates the no-tenant sentinel context.
    pub fn none() -> Self {
        Self {
            organization_id: None,
            host: None,
            entity_key: None,
            method: None,
            access_level: AccessLevel::Public,
            datasource: None,
        }
    }

    /// Creates a context for the given organization.
    pub fn for_organization(organization_id: i32) -> Self {
        Self {
            organization_id: Some(organization_id),
            ..Self::none()
        }
    }

    /// Replaces the organization, keeping every other field.
    ///
    /// Passing `None` detaches the context from any tenant schema while
    /// preserving the request attribution fields.
    pub fn with_organization(mut self, organization_id: Option<i32>) -> Self {
        self.organization_id = organization_id;
        self
    }

    /// Sets the originating request host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the entity key.
    pub fn with_entity_key(mut self, entity_key: impl Into<String>) -> Self {
        self.entity_key = Some(entity_key.into());
        self
    }

    /// Sets the request method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the access level.
    pub fn with_access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    /// Pins the context to an explicit datasource index.
    pub fn with_datasource(mut self, index: usize) -> Self {
        self.datasource = Some(index);
        self
    }

    /// Returns the organization id, if any.
    pub fn organization_id(&self) -> Option<i32> {
        self.organization_id
    }

    /// Returns the request host, if set.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the entity key, if set.
    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    /// Returns the request method, if set.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Returns the access level.
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Returns the datasource override, if set.
    pub fn datasource(&self) -> Option<usize> {
        self.datasource
    }

    /// Returns `true` if this is the no-tenant sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    /// Returns a hash of the tenant identity fields.
    ///
    /// The value is stable for the lifetime of the process and identical for
    /// contexts that compare equal, which makes it usable as a session-level
    /// tenant identifier.
    pub fn identity_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::none()
    }
}

// Equality and hashing cover the identity fields only. `access_level` and
// `datasource` are routing hints and must not fragment the identity space.

impl PartialEq for TenantContext {
    fn eq(&self, other: &Self) -> bool {
        self.organization_id == other.organization_id
            && self.host == other.host
            && self.entity_key == other.entity_key
            && self.method == other.method
    }
}

impl Eq for TenantContext {}

impl Hash for TenantContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.organization_id.hash(state);
        self.host.hash(state);
        self.entity_key.hash(state);
        self.method.hash(state);
    }
}
