use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::TourPackageRepository;
use crate::domain::{DomainError, TourPackage};

use super::duckdb_tour_rating_repository::is_duplicate_key_violation;

pub struct DuckdbTourPackageRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbTourPackageRepository {
    /// Create a new adapter using an existing shared connection.
    pub async fn with_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, DomainError> {
        let conn_guard = conn.lock().await;
        Self::initialize_schema(&conn_guard)?;
        drop(conn_guard);

        Ok(Self { conn })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tour_packages (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize tour_packages schema: {}", e))
        })?;

        debug!("DuckDB tour_packages table initialized");
        Ok(())
    }

    fn find_one(
        conn: &Connection,
        sql: &str,
        key: &str,
    ) -> Result<Option<TourPackage>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![key], |row| {
            Ok(TourPackage::new(row.get(0)?, row.get(1)?))
        }) {
            Ok(package) => Ok(Some(package)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query tour package: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl TourPackageRepository for DuckdbTourPackageRepository {
    async fn save(&self, package: &TourPackage) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO tour_packages (code, name)
            VALUES (?1, ?2)
            ON CONFLICT (code) DO UPDATE SET name = excluded.name
            "#,
            params![package.code(), package.name()],
        )
        .map_err(|e| {
            if is_duplicate_key_violation(&e) {
                DomainError::duplicate_key(format!(
                    "Tour package name already used: {}",
                    package.name()
                ))
            } else {
                DomainError::storage(format!("Failed to save tour package: {}", e))
            }
        })?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, DomainError> {
        let conn = self.conn.lock().await;
        Self::find_one(
            &conn,
            "SELECT code, name FROM tour_packages WHERE code = ?1",
            code,
        )
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, DomainError> {
        let conn = self.conn.lock().await;
        Self::find_one(
            &conn,
            "SELECT code, name FROM tour_packages WHERE name = ?1",
            name,
        )
    }

    async fn find_all(&self) -> Result<Vec<TourPackage>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT code, name FROM tour_packages ORDER BY code")
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], |row| Ok(TourPackage::new(row.get(0)?, row.get(1)?)))
            .map_err(|e| DomainError::storage(format!("Failed to query tour packages: {}", e)))?;

        let mut packages = Vec::new();
        for row in rows {
            packages
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(packages)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tour_packages", [], |row| row.get(0))
            .map_err(|e| DomainError::storage(format!("Failed to count tour packages: {}", e)))?;
        Ok(count as u64)
    }
}
