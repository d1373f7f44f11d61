//! Shared PostgreSQL test harness for tenancy integration tests.
//!
//! One PostgreSQL container is started per test process. Each test gets its
//! own freshly created database, so catalog assertions stay exact even when
//! tests run in parallel.

use switchyard_tenancy::{PostgresConfig, PostgresSslMode, TenancyConfig};

use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Shared PostgreSQL container reused across all tests in this process.
pub struct PgHarness {
    host: String,
    port: u16,
    /// Kept alive for the duration of the test binary; dropped at process exit.
    _container: testcontainers::ContainerAsync<Postgres>,
}

static SHARED_PG: OnceCell<PgHarness> = OnceCell::const_new();

impl PgHarness {
    /// Returns the process-global harness, starting the container on first use.
    pub async fn shared() -> &'static PgHarness {
        SHARED_PG
            .get_or_init(|| async {
                let run_id = std::env::var("GITHUB_RUN_ID").unwrap_or_default();
                let container = Postgres::default()
                    .with_label("github.run_id", &run_id)
                    .start()
                    .await
                    .expect("failed to start PostgreSQL container");

                let port = container
                    .get_host_port_ipv4(5432)
                    .await
                    .expect("failed to get host port");

                let host = container
                    .get_host()
                    .await
                    .expect("failed to get host")
                    .to_string();

                PgHarness {
                    host,
                    port,
                    _container: container,
                }
            })
            .await
    }

    /// Endpoint config for the container's administrative database.
    pub fn admin_config(&self) -> PostgresConfig {
        PostgresConfig {
            host: self.host.clone(),
            port: self.port,
            dbname: "postgres".to_string(),
            user: "postgres".to_string(),
            password: Some("postgres".to_string()),
            ssl_mode: PostgresSslMode::Disable,
            max_connections: 5,
            ..Default::default()
        }
    }

    /// Creates a fresh database on the shared container and returns an
    /// endpoint config pointing at it.
    pub async fn fresh_database(&self, prefix: &str) -> PostgresConfig {
        let dbname = format!("{}_{}", prefix, Uuid::new_v4().simple());

        let admin = self.admin_config();
        let conn = format!(
            "host={} port={} dbname={} user={} password=postgres",
            admin.host, admin.port, admin.dbname, admin.user,
        );
        let (client, connection) = tokio_postgres::connect(&conn, tokio_postgres::NoTls)
            .await
            .expect("failed to connect to admin database");
        tokio::spawn(connection);

        client
            .batch_execute(&format!(r#"CREATE DATABASE "{}""#, dbname))
            .await
            .expect("failed to create test database");

        PostgresConfig {
            dbname,
            ..self.admin_config()
        }
    }
}

/// Tenancy config over a fresh database with default routing and no replicas.
pub async fn fresh_config(prefix: &str) -> TenancyConfig {
    TenancyConfig::new(PgHarness::shared().await.fresh_database(prefix).await)
}
