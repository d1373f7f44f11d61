//! Schema naming and search path routing.
//!
//! Each organization owns a separate PostgreSQL schema in a shared database;
//! routing a connection to a tenant means pointing its `search_path` at that
//! schema. This module owns the naming convention and every piece of SQL
//! built from it; derived names are validated before any directive is
//! issued.

use serde::{Deserialize, Serialize};

use crate::error::TenantError;

/// Configuration for schema naming and routing.
///
/// # Example
///
/// ```
/// use switchyard_tenancy::SchemaRouting;
///
/// let routing = SchemaRouting {
///     schema_prefix: "client_".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRouting {
    /// Prefix for tenant schema names.
    ///
    /// The full schema name is `{prefix}{organization_id}`.
    #[serde(default = "default_schema_prefix")]
    pub schema_prefix: String,

    /// Name of the shared schema for cross-tenant resources.
    #[serde(default = "default_shared_schema")]
    pub shared_schema: String,

    /// Maximum schema name length (PostgreSQL limit is 63).
    #[serde(default = "default_max_schema_length")]
    pub max_schema_length: usize,

    /// Pattern schema names must match before being used in a directive.
    #[serde(default = "default_schema_pattern")]
    pub schema_pattern: String,
}

fn default_schema_prefix() -> String {
    "org_".to_string()
}

fn default_shared_schema() -> String {
    "public".to_string()
}

fn default_max_schema_length() -> usize {
    63 // PostgreSQL identifier limit
}

fn default_schema_pattern() -> String {
    r"^[a-z][a-z0-9_]*$".to_string()
}

impl Default for SchemaRouting {
    fn default() -> Self {
        Self {
            schema_prefix: default_schema_prefix(),
            shared_schema: default_shared_schema(),
            max_schema_length: default_max_schema_length(),
            schema_pattern: default_schema_pattern(),
        }
    }
}

impl SchemaRouting {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.schema_prefix = prefix.into();
        self
    }

    /// Sets the shared schema name.
    pub fn with_shared_schema(mut self, schema: impl Into<String>) -> Self {
        self.shared_schema = schema.into();
        self
    }
}

/// Maps organizations to schemas and generates the routing SQL.
///
/// # Schema Naming
///
/// Organization ids are converted to schema names by prepending the
/// configured prefix (default: `org_`), so organization 42 lives in schema
/// `org_42`. Derived names are validated against the configured pattern and
/// length limit before they appear in any directive.
///
/// # Search Path
///
/// For a request scoped to organization 42, the connection is scoped with:
///
/// ```sql
/// SET search_path TO "org_42", "public"
/// ```
///
/// Unqualified table references then resolve in the tenant schema first and
/// fall back to the shared schema. A request with no organization gets the
/// shared schema only, so tenant tables are simply not visible.
///
/// # Reset
///
/// Before a connection returns to the pool its search path is restored with
/// an explicit `SET search_path TO "public"` rather than `RESET search_path`:
/// the session default could itself name a tenant schema (per-role settings),
/// and the restored state must not depend on it.
#[derive(Debug, Clone)]
pub struct SchemaRouter {
    config: SchemaRouting,
    schema_pattern: regex::Regex,
}

impl SchemaRouter {
    /// Creates a new router with the given configuration.
    pub fn new(config: SchemaRouting) -> Result<Self, TenantError> {
        let schema_pattern =
            regex::Regex::new(&config.schema_pattern).map_err(|e| TenantError::InvalidPattern {
                pattern: config.schema_pattern.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            config,
            schema_pattern,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SchemaRouting {
        &self.config
    }

    /// Returns the shared schema name.
    pub fn shared_schema(&self) -> &str {
        &self.config.shared_schema
    }

    /// Converts an organization id to its schema name.
    pub fn schema_for(&self, organization_id: i32) -> String {
        format!("{}{}", self.config.schema_prefix, organization_id)
    }

    /// Converts a schema name back to an organization id.
    ///
    /// Returns `None` for names that do not follow the tenant naming
    /// convention.
    pub fn organization_for(&self, schema: &str) -> Option<i32> {
        schema
            .strip_prefix(&self.config.schema_prefix)
            .and_then(|suffix| suffix.parse().ok())
    }

    /// Validates the schema name derived from an organization id.
    ///
    /// Returns the schema name on success.
    pub fn validate(&self, organization_id: i32) -> Result<String, TenantError> {
        let schema = self.schema_for(organization_id);

        if schema.len() > self.config.max_schema_length {
            return Err(TenantError::InvalidSchemaName {
                schema,
                reason: format!(
                    "schema name exceeds maximum length of {} characters",
                    self.config.max_schema_length
                ),
            });
        }

        if !self.schema_pattern.is_match(&schema) {
            return Err(TenantError::InvalidSchemaName {
                schema,
                reason: format!(
                    "schema name does not match required pattern: {}",
                    self.config.schema_pattern
                ),
            });
        }

        Ok(schema)
    }

    /// Generates SQL to set the search path for an organization.
    ///
    /// With no organization the search path names the shared schema only.
    pub fn set_search_path_sql(&self, organization_id: Option<i32>) -> String {
        match organization_id {
            Some(org) => format!(
                "SET search_path TO {}, {}",
                escape_identifier(&self.schema_for(org)),
                escape_identifier(&self.config.shared_schema)
            ),
            None => format!(
                "SET search_path TO {}",
                escape_identifier(&self.config.shared_schema)
            ),
        }
    }

    /// Generates SQL to restore the search path to the shared schema.
    pub fn reset_search_path_sql(&self) -> String {
        format!(
            "SET search_path TO {}",
            escape_identifier(&self.config.shared_schema)
        )
    }

    /// Generates SQL to create the schema for an organization.
    pub fn create_schema_sql(&self, organization_id: i32) -> String {
        format!(
            "CREATE SCHEMA IF NOT EXISTS {}",
            escape_identifier(&self.schema_for(organization_id))
        )
    }

    /// Generates SQL to drop the schema for an organization.
    pub fn drop_schema_sql(&self, organization_id: i32, cascade: bool) -> String {
        let cascade_str = if cascade { " CASCADE" } else { "" };
        format!(
            "DROP SCHEMA IF EXISTS {}{}",
            escape_identifier(&self.schema_for(organization_id)),
            cascade_str
        )
    }

    /// Generates SQL to check whether the schema for an organization exists.
    pub fn schema_exists_sql(&self, organization_id: i32) -> String {
        format!(
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = '{}')",
            escape_sql_string(&self.schema_for(organization_id))
        )
    }

    /// Generates SQL to list all tenant schemas, sorted by name.
    pub fn list_schemas_sql(&self) -> String {
        format!(
            "SELECT schema_name FROM information_schema.schemata WHERE schema_name LIKE '{}%' ORDER BY schema_name",
            escape_like_pattern(&self.config.schema_prefix)
        )
    }
}

/// Escapes a SQL identifier (schema name, table name, etc.).
fn escape_identifier(id: &str) -> String {
    format!("\"{}\"", id.replace('"', "\"\""))
}

/// Escapes a string for safe inclusion in a SQL literal.
fn escape_sql_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Escapes a string for use as a LIKE prefix.
///
/// `_` and `%` are wildcards inside LIKE patterns; a prefix of `org_` must
/// not match `orgX`.
fn escape_like_pattern(s: &str) -> String {
    escape_sql_string(s)
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
