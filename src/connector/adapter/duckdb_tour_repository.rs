use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::TourRepository;
use crate::domain::{Difficulty, DomainError, NewTour, Region, Tour};

const TOUR_COLUMNS: &str = "id, title, description, blurb, price, duration, bullets, keywords, \
                            tour_package_code, difficulty, region";

/// A `tours` row before its enum columns are parsed.
struct TourRow {
    id: i64,
    title: String,
    description: String,
    blurb: String,
    price: i32,
    duration: String,
    bullets: String,
    keywords: String,
    tour_package_code: String,
    difficulty: String,
    region: String,
}

impl TourRow {
    fn into_tour(self) -> Result<Tour, DomainError> {
        let id = self.id;
        let corrupt = move |e: DomainError| DomainError::storage(format!("Corrupt tour {}: {}", id, e));
        let difficulty = Difficulty::parse(&self.difficulty).map_err(corrupt)?;
        let region = Region::parse(&self.region).map_err(corrupt)?;

        Ok(Tour::from_new(
            id,
            NewTour {
                title: self.title,
                description: self.description,
                blurb: self.blurb,
                price: self.price,
                duration: self.duration,
                bullets: self.bullets,
                keywords: self.keywords,
                tour_package_code: self.tour_package_code,
                difficulty,
                region,
            },
        ))
    }
}

pub struct DuckdbTourRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbTourRepository {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns a clone of the shared connection Arc.
    /// DuckDB only allows one write connection per file, so the package and
    /// rating adapters run on this same connection.
    pub fn shared_connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE SEQUENCE IF NOT EXISTS tour_id_seq START 1;

            CREATE TABLE IF NOT EXISTS tours (
                id BIGINT PRIMARY KEY DEFAULT nextval('tour_id_seq'),
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                blurb TEXT NOT NULL,
                price INTEGER NOT NULL,
                duration TEXT NOT NULL,
                bullets TEXT NOT NULL,
                keywords TEXT NOT NULL,
                tour_package_code TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                region TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tours_package
            ON tours(tour_package_code);
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize tours schema: {}", e)))?;

        debug!("DuckDB tours schema initialized");
        Ok(())
    }

    fn read_row(row: &Row<'_>) -> duckdb::Result<TourRow> {
        Ok(TourRow {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            blurb: row.get(3)?,
            price: row.get(4)?,
            duration: row.get(5)?,
            bullets: row.get(6)?,
            keywords: row.get(7)?,
            tour_package_code: row.get(8)?,
            difficulty: row.get(9)?,
            region: row.get(10)?,
        })
    }

    fn query_tours(
        conn: &Connection,
        sql: &str,
        params: &[&dyn duckdb::ToSql],
    ) -> Result<Vec<Tour>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params, Self::read_row)
            .map_err(|e| DomainError::storage(format!("Failed to query tours: {}", e)))?;

        let mut tours = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            tours.push(raw.into_tour()?);
        }
        Ok(tours)
    }
}

#[async_trait]
impl TourRepository for DuckdbTourRepository {
    async fn insert(&self, tour: &NewTour) -> Result<Tour, DomainError> {
        let conn = self.conn.lock().await;

        let id: i64 = conn
            .query_row(
                r#"
                INSERT INTO tours (title, description, blurb, price, duration, bullets, keywords, tour_package_code, difficulty, region)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
                params![
                    tour.title,
                    tour.description,
                    tour.blurb,
                    tour.price,
                    tour.duration,
                    tour.bullets,
                    tour.keywords,
                    tour.tour_package_code,
                    tour.difficulty.as_str(),
                    tour.region.label(),
                ],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to save tour: {}", e)))?;

        debug!("Inserted tour {} with id {}", tour.title, id);
        Ok(Tour::from_new(id, tour.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tour>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM tours WHERE id = ?", TOUR_COLUMNS);
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![id], Self::read_row) {
            Ok(raw) => Ok(Some(raw.into_tour()?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Failed to query tour: {}", e))),
        }
    }

    async fn find_all(&self) -> Result<Vec<Tour>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM tours ORDER BY id", TOUR_COLUMNS);
        Self::query_tours(&conn, &sql, &[])
    }

    async fn find_by_package(&self, package_code: &str) -> Result<Vec<Tour>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM tours WHERE tour_package_code = ? ORDER BY id",
            TOUR_COLUMNS
        );
        Self::query_tours(&conn, &sql, &[&package_code])
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tours", [], |row| row.get(0))
            .map_err(|e| DomainError::storage(format!("Failed to count tours: {}", e)))?;
        Ok(count as u64)
    }
}
