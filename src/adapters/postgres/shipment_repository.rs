//! PostgreSQL implementation of ShipmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ShipmentId, Timestamp};
use crate::domain::shipment::{
    NewShipment, PageRequest, Shipment, ShipmentFilter, ShipmentPatch, ShipmentSort,
    ShipmentStatus,
};
use crate::ports::ShipmentRepository;

use super::map_sqlx_error;

const COLUMNS: &str = "id, tracking_number, origin, destination, status, carrier, weight, \
     dimensions, estimated_delivery, actual_delivery, customer_name, customer_email, \
     creator_email, created_at, updated_at";

/// Filter predicate over binds `$1..$5`: status, then `like_pattern`s for
/// carrier, origin, destination and search.
const FILTER_CLAUSE: &str = r#"
    ($1::text IS NULL OR status = $1)
    AND ($2::text IS NULL OR carrier ILIKE $2 ESCAPE '\')
    AND ($3::text IS NULL OR origin ILIKE $3 ESCAPE '\')
    AND ($4::text IS NULL OR destination ILIKE $4 ESCAPE '\')
    AND ($5::text IS NULL
         OR tracking_number ILIKE $5 ESCAPE '\'
         OR customer_name ILIKE $5 ESCAPE '\'
         OR origin ILIKE $5 ESCAPE '\'
         OR destination ILIKE $5 ESCAPE '\')
"#;

/// PostgreSQL implementation of ShipmentRepository.
#[derive(Clone)]
pub struct PostgresShipmentRepository {
    pool: PgPool,
}

impl PostgresShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &ShipmentId) -> DomainError {
    DomainError::new(ErrorCode::ShipmentNotFound, "Shipment not found")
        .with_detail("id", id.to_string())
}

/// Substring pattern for `ILIKE ... ESCAPE '\'` with wildcards in the
/// term matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Binds `$1..$5` of `FILTER_CLAUSE`.
fn bind_filter<'q>(sql: &'q str, filter: &ShipmentFilter) -> Query<'q, Postgres, PgArguments> {
    let pattern = |term: &Option<String>| term.as_deref().map(like_pattern);
    sqlx::query(sql)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(pattern(&filter.carrier))
        .bind(pattern(&filter.origin))
        .bind(pattern(&filter.destination))
        .bind(pattern(&filter.search))
}

/// ORDER BY for a sort; the column comes from a closed enum.
fn order_clause(sort: &ShipmentSort) -> String {
    let dir = sort.direction.as_sql();
    format!("ORDER BY {} {dir}, id {dir}", sort.field.column())
}

#[async_trait]
impl ShipmentRepository for PostgresShipmentRepository {
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM shipments WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch shipment"))?;

        row.map(row_to_shipment).transpose()
    }

    async fn exists_by_tracking_number(&self, tracking_number: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM shipments WHERE tracking_number = $1)")
                .bind(tracking_number)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, "Failed to check tracking number"))?;

        Ok(exists)
    }

    async fn list(
        &self,
        filter: &ShipmentFilter,
        sort: &ShipmentSort,
        page: &PageRequest,
    ) -> Result<Vec<Shipment>, DomainError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM shipments WHERE {FILTER_CLAUSE} {} LIMIT $6 OFFSET $7",
            order_clause(sort)
        );

        let rows = bind_filter(&sql, filter)
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to list shipments"))?;

        rows.into_iter().map(row_to_shipment).collect()
    }

    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM shipments WHERE {FILTER_CLAUSE}");
        let row = bind_filter(&sql, filter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to count shipments"))?;
        let count: i64 = row
            .try_get(0)
            .map_err(|e| map_sqlx_error(e, "Failed to count shipments"))?;

        Ok(count.max(0) as u64)
    }

    async fn insert(&self, shipment: &NewShipment) -> Result<Shipment, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO shipments (
                tracking_number, origin, destination, status, carrier, weight, dimensions,
                estimated_delivery, customer_name, customer_email, creator_email
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&shipment.tracking_number)
        .bind(&shipment.origin)
        .bind(&shipment.destination)
        .bind(shipment.status.as_str())
        .bind(&shipment.carrier)
        .bind(shipment.weight)
        .bind(&shipment.dimensions)
        .bind(shipment.estimated_delivery.as_datetime())
        .bind(&shipment.customer_name)
        .bind(&shipment.customer_email)
        .bind(shipment.creator_email.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to insert shipment"))?;

        row_to_shipment(row)
    }

    async fn update(
        &self,
        id: &ShipmentId,
        patch: &ShipmentPatch,
    ) -> Result<Shipment, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE shipments SET
                tracking_number = COALESCE($2, tracking_number),
                origin = COALESCE($3, origin),
                destination = COALESCE($4, destination),
                status = COALESCE($5, status),
                carrier = COALESCE($6, carrier),
                weight = COALESCE($7, weight),
                dimensions = COALESCE($8, dimensions),
                estimated_delivery = COALESCE($9, estimated_delivery),
                actual_delivery = COALESCE($10, actual_delivery),
                customer_name = COALESCE($11, customer_name),
                customer_email = COALESCE($12, customer_email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(patch.tracking_number.as_deref())
        .bind(patch.origin.as_deref())
        .bind(patch.destination.as_deref())
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.carrier.as_deref())
        .bind(patch.weight)
        .bind(patch.dimensions.as_deref())
        .bind(patch.estimated_delivery.map(|t| *t.as_datetime()))
        .bind(patch.actual_delivery.map(|t| *t.as_datetime()))
        .bind(patch.customer_name.as_deref())
        .bind(patch.customer_email.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to update shipment"))?;

        match row {
            Some(row) => row_to_shipment(row),
            None => Err(not_found(id)),
        }
    }

    async fn delete(&self, id: &ShipmentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete shipment"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn row_to_shipment(row: PgRow) -> Result<Shipment, DomainError> {
    let decode = |e: sqlx::Error| map_sqlx_error(e, "Failed to decode shipment row");

    let status: String = row.try_get("status").map_err(decode)?;
    let status: ShipmentStatus = status.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status in database: {}", status),
        )
    })?;
    let actual_delivery: Option<DateTime<Utc>> = row.try_get("actual_delivery").map_err(decode)?;

    Ok(Shipment {
        id: ShipmentId::new(row.try_get("id").map_err(decode)?),
        tracking_number: row.try_get("tracking_number").map_err(decode)?,
        origin: row.try_get("origin").map_err(decode)?,
        destination: row.try_get("destination").map_err(decode)?,
        status,
        carrier: row.try_get("carrier").map_err(decode)?,
        weight: row.try_get("weight").map_err(decode)?,
        dimensions: row.try_get("dimensions").map_err(decode)?,
        estimated_delivery: Timestamp::from_datetime(
            row.try_get("estimated_delivery").map_err(decode)?,
        ),
        actual_delivery: actual_delivery.map(Timestamp::from_datetime),
        customer_name: row.try_get("customer_name").map_err(decode)?,
        customer_email: row.try_get("customer_email").map_err(decode)?,
        creator_email: row.try_get("creator_email").map_err(decode)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(decode)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(decode)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::{SortDirection, SortField};

    #[test]
    fn order_clause_always_breaks_ties_on_id() {
        let sort = ShipmentSort::new(SortField::EstimatedDelivery, SortDirection::Asc);
        assert_eq!(
            order_clause(&sort),
            "ORDER BY estimated_delivery ASC, id ASC"
        );
        assert_eq!(
            order_clause(&ShipmentSort::default()),
            "ORDER BY created_at DESC, id DESC"
        );
    }

    #[test]
    fn like_pattern_wraps_plain_terms() {
        assert_eq!(like_pattern("Rotterdam"), "%Rotterdam%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("_"), r"%\_%");
        assert_eq!(like_pattern("50%"), r"%50\%%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn filter_clause_declares_escape_character() {
        assert_eq!(FILTER_CLAUSE.matches("ILIKE").count(), 7);
        assert_eq!(FILTER_CLAUSE.matches(r"ESCAPE '\'").count(), 7);
    }
}
