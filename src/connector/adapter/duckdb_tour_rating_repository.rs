use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::application::{RatingTransaction, TourRatingRepository, UnitOfWork};
use crate::domain::{DomainError, Page, PageRequest, TourRating};

const INSERT_RATING: &str =
    "INSERT INTO tour_ratings (tour_id, customer_id, score, comment) VALUES (?, ?, ?, ?)";

pub struct DuckdbTourRatingRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbTourRatingRepository {
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
            CREATE TABLE IF NOT EXISTS tour_ratings (
                tour_id BIGINT NOT NULL,
                customer_id BIGINT NOT NULL,
                score INTEGER NOT NULL,
                comment TEXT,
                PRIMARY KEY (tour_id, customer_id)
            );
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize tour_ratings schema: {}", e))
        })?;

        debug!("DuckDB tour_ratings table initialized");
        Ok(())
    }

    fn read_row(row: &Row<'_>) -> duckdb::Result<TourRating> {
        Ok(TourRating::new(
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
        ))
    }

    fn query_ratings(
        conn: &Connection,
        sql: &str,
        params: &[&dyn duckdb::ToSql],
    ) -> Result<Vec<TourRating>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params, Self::read_row)
            .map_err(|e| DomainError::storage(format!("Failed to query tour ratings: {}", e)))?;

        let mut ratings = Vec::new();
        for row in rows {
            ratings
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(ratings)
    }
}

fn insert_rating(conn: &Connection, rating: &TourRating) -> Result<(), DomainError> {
    conn.execute(
        INSERT_RATING,
        params![
            rating.tour_id(),
            rating.customer_id(),
            rating.score(),
            rating.comment(),
        ],
    )
    .map_err(|e| {
        if is_duplicate_key_violation(&e) {
            DomainError::duplicate_key(format!(
                "Rating for tour {} by customer {} already exists",
                rating.tour_id(),
                rating.customer_id()
            ))
        } else {
            DomainError::storage(format!("Failed to insert tour rating: {}", e))
        }
    })?;
    Ok(())
}

/// DuckDB reports primary key and UNIQUE collisions as "Duplicate key ...".
/// NOT NULL and CHECK failures share the "Constraint Error" prefix and stay storage errors.
pub(crate) fn is_duplicate_key_violation(err: &duckdb::Error) -> bool {
    err.to_string().contains("Duplicate key")
}

#[async_trait]
impl TourRatingRepository for DuckdbTourRatingRepository {
    async fn find_by_key(
        &self,
        tour_id: i64,
        customer_id: i64,
    ) -> Result<Option<TourRating>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT tour_id, customer_id, score, comment FROM tour_ratings \
                 WHERE tour_id = ? AND customer_id = ?",
            )
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![tour_id, customer_id], Self::read_row) {
            Ok(rating) => Ok(Some(rating)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query tour rating: {}",
                e
            ))),
        }
    }

    async fn find_by_tour_id(&self, tour_id: i64) -> Result<Vec<TourRating>, DomainError> {
        let conn = self.conn.lock().await;
        Self::query_ratings(
            &conn,
            "SELECT tour_id, customer_id, score, comment FROM tour_ratings \
             WHERE tour_id = ? ORDER BY customer_id",
            &[&tour_id],
        )
    }

    async fn find_page_by_tour_id(
        &self,
        tour_id: i64,
        request: PageRequest,
    ) -> Result<Page<TourRating>, DomainError> {
        let conn = self.conn.lock().await;
        let total: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM tour_ratings WHERE tour_id = ?",
                params![tour_id],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to count tour ratings: {}", e)))?;

        let sql = format!(
            "SELECT tour_id, customer_id, score, comment FROM tour_ratings \
             WHERE tour_id = ? ORDER BY customer_id LIMIT {} OFFSET {}",
            request.size(),
            request.offset()
        );
        let items = Self::query_ratings(&conn, &sql, &[&tour_id])?;

        Ok(Page::new(items, request, total as u64))
    }

    async fn find_all(&self) -> Result<Vec<TourRating>, DomainError> {
        let conn = self.conn.lock().await;
        Self::query_ratings(
            &conn,
            "SELECT tour_id, customer_id, score, comment FROM tour_ratings \
             ORDER BY tour_id, customer_id",
            &[],
        )
    }

    async fn insert(&self, rating: &TourRating) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        insert_rating(&conn, rating)?;

        debug!(
            "Inserted rating for tour {} by customer {}",
            rating.tour_id(),
            rating.customer_id()
        );
        Ok(())
    }

    async fn save(&self, rating: &TourRating) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO tour_ratings (tour_id, customer_id, score, comment)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (tour_id, customer_id) DO UPDATE SET
                score = excluded.score,
                comment = excluded.comment
            "#,
            params![
                rating.tour_id(),
                rating.customer_id(),
                rating.score(),
                rating.comment(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save tour rating: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, rating: &TourRating) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM tour_ratings WHERE tour_id = ? AND customer_id = ?",
            params![rating.tour_id(), rating.customer_id()],
        )
        .map_err(|e| DomainError::storage(format!("Failed to delete tour rating: {}", e)))?;

        debug!(
            "Deleted rating for tour {} by customer {}",
            rating.tour_id(),
            rating.customer_id()
        );
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tour_ratings", [], |row| row.get(0))
            .map_err(|e| DomainError::storage(format!("Failed to count tour ratings: {}", e)))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl UnitOfWork for DuckdbTourRatingRepository {
    async fn begin(&self) -> Result<Box<dyn RatingTransaction>, DomainError> {
        let conn = Arc::clone(&self.conn).lock_owned().await;
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        Ok(Box::new(DuckdbRatingTransaction {
            conn: Some(conn),
            inserted: 0,
        }))
    }
}

/// Holds the connection lock from `BEGIN` until `COMMIT` or `ROLLBACK`.
pub struct DuckdbRatingTransaction {
    conn: Option<OwnedMutexGuard<Connection>>,
    inserted: usize,
}

impl DuckdbRatingTransaction {
    fn finish(&mut self, statement: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .take()
            .ok_or_else(|| DomainError::storage("Transaction already finished"))?;
        conn.execute_batch(statement)
            .map_err(|e| DomainError::storage(format!("Failed to {}: {}", statement, e)))
    }
}

#[async_trait]
impl RatingTransaction for DuckdbRatingTransaction {
    async fn insert(&mut self, rating: &TourRating) -> Result<(), DomainError> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| DomainError::storage("Transaction already finished"))?;
        insert_rating(conn, rating)?;
        self.inserted += 1;
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), DomainError> {
        self.finish("COMMIT")?;
        debug!("Committed {} tour ratings", self.inserted);
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), DomainError> {
        self.finish("ROLLBACK")?;
        debug!("Rolled back {} tour ratings", self.inserted);
        Ok(())
    }
}

impl Drop for DuckdbRatingTransaction {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                warn!("Failed to roll back abandoned transaction: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(conn: &Connection, sql: &str) -> duckdb::Error {
        conn.execute_batch(sql).unwrap_err()
    }

    #[test]
    fn test_only_key_collisions_count_as_duplicates() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, v INTEGER NOT NULL CHECK (v >= 0));
             INSERT INTO t VALUES (1, 1);",
        )
        .unwrap();

        let dup = violation(&conn, "INSERT INTO t VALUES (1, 2)");
        assert!(is_duplicate_key_violation(&dup), "{}", dup);

        let not_null = violation(&conn, "INSERT INTO t VALUES (2, NULL)");
        assert!(!is_duplicate_key_violation(&not_null), "{}", not_null);

        let check = violation(&conn, "INSERT INTO t VALUES (3, -1)");
        assert!(!is_duplicate_key_violation(&check), "{}", check);
    }
}
