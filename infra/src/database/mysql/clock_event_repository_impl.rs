//! MySQL implementation of the clock event store.
//!
//! Conditional appends lock the `(worker, location)` row in `rcp_clock_heads`
//! with `SELECT ... FOR UPDATE`, compare its `last_event_id` with the caller's
//! expectation, then insert the event and advance the head in the same
//! transaction. Competing appends for one pair therefore serialise on the
//! head row, and a stale expectation yields `AppendOutcome::Conflict`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::debug;
use uuid::Uuid;

use rcp_core::domain::entities::{ClockEvent, ClockEventType};
use rcp_core::errors::DomainError;
use rcp_core::repositories::{AppendOutcome, ClockEventRepository};

use super::{column, db_err, uuid_column};

/// SQLSTATE reported by InnoDB when it aborts a transaction to break a deadlock
const SQLSTATE_DEADLOCK: &str = "40001";

const EVENT_COLUMNS: &str = "e.id, e.worker_id, e.organization_id, e.location_id, e.event_type, \
    e.happened_at, e.client_time, e.client_latitude, e.client_longitude, e.accuracy_meters, \
    e.distance_meters, e.token_hash, e.user_agent, e.ip_address";

pub struct MySqlClockEventRepository {
    pool: MySqlPool,
}

impl MySqlClockEventRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &MySqlRow) -> Result<ClockEvent, DomainError> {
        let event_type: String = column(row, "event_type")?;
        let event_type = ClockEventType::parse(&event_type).ok_or_else(|| DomainError::Storage {
            message: format!("Unknown clock event type: {}", event_type),
        })?;

        Ok(ClockEvent {
            id: uuid_column(row, "id")?,
            worker_id: uuid_column(row, "worker_id")?,
            organization_id: uuid_column(row, "organization_id")?,
            location_id: uuid_column(row, "location_id")?,
            event_type,
            happened_at: column(row, "happened_at")?,
            client_time: column(row, "client_time")?,
            client_latitude: column(row, "client_latitude")?,
            client_longitude: column(row, "client_longitude")?,
            accuracy_meters: column(row, "accuracy_meters")?,
            distance_meters: column(row, "distance_meters")?,
            token_hash: column(row, "token_hash")?,
            user_agent: column(row, "user_agent")?,
            ip_address: column(row, "ip_address")?,
        })
    }

    async fn try_append(
        &self,
        event: &ClockEvent,
        expected_previous: Option<Uuid>,
    ) -> Result<AppendOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let worker_id = event.worker_id.to_string();
        let location_id = event.location_id.to_string();

        sqlx::query(
            r#"
            INSERT IGNORE INTO rcp_clock_heads (worker_id, location_id, last_event_id, updated_at)
            VALUES (?, ?, NULL, ?)
            "#,
        )
        .bind(&worker_id)
        .bind(&location_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let current: Option<String> = sqlx::query_scalar(
            r#"
            SELECT last_event_id FROM rcp_clock_heads
            WHERE worker_id = ? AND location_id = ?
            FOR UPDATE
            "#,
        )
        .bind(&worker_id)
        .bind(&location_id)
        .fetch_one(&mut *tx)
        .await?;

        let expected = expected_previous.map(|id| id.to_string());
        if current != expected {
            tx.rollback().await?;
            return Ok(AppendOutcome::Conflict);
        }

        Self::insert_event(&mut tx, event).await?;

        sqlx::query(
            r#"
            UPDATE rcp_clock_heads SET last_event_id = ?, updated_at = ?
            WHERE worker_id = ? AND location_id = ?
            "#,
        )
        .bind(event.id.to_string())
        .bind(Utc::now())
        .bind(&worker_id)
        .bind(&location_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AppendOutcome::Appended(event.clone()))
    }

    async fn insert_event(
        tx: &mut Transaction<'_, MySql>,
        event: &ClockEvent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO rcp_clock_events (
                id, worker_id, organization_id, location_id, event_type, happened_at,
                client_time, client_latitude, client_longitude, accuracy_meters,
                distance_meters, token_hash, user_agent, ip_address
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id.to_string())
        .bind(event.worker_id.to_string())
        .bind(event.organization_id.to_string())
        .bind(event.location_id.to_string())
        .bind(event.event_type.as_str())
        .bind(event.happened_at)
        .bind(event.client_time)
        .bind(event.client_latitude)
        .bind(event.client_longitude)
        .bind(event.accuracy_meters)
        .bind(event.distance_meters)
        .bind(&event.token_hash)
        .bind(&event.user_agent)
        .bind(&event.ip_address)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

fn is_deadlock(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == SQLSTATE_DEADLOCK)
}

#[async_trait]
impl ClockEventRepository for MySqlClockEventRepository {
    async fn most_recent(
        &self,
        worker_id: Uuid,
        location_id: Uuid,
    ) -> Result<Option<ClockEvent>, DomainError> {
        // Read through the head so the answer matches what appends compare against
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM rcp_clock_heads h \
             JOIN rcp_clock_events e ON e.id = h.last_event_id \
             WHERE h.worker_id = ? AND h.location_id = ?"
        );
        let row = sqlx::query(&sql)
            .bind(worker_id.to_string())
            .bind(location_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_event).transpose()
    }

    async fn most_recent_in_org(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
    ) -> Result<Option<ClockEvent>, DomainError> {
        let mut history = self
            .history(worker_id, organization_id, location_id, 1)
            .await?;
        Ok(history.pop())
    }

    async fn append_if_latest(
        &self,
        event: &ClockEvent,
        expected_previous: Option<Uuid>,
    ) -> Result<AppendOutcome, DomainError> {
        match self.try_append(event, expected_previous).await {
            Ok(outcome) => Ok(outcome),
            Err(e) if is_deadlock(&e) => {
                debug!(
                    worker_id = %event.worker_id,
                    location_id = %event.location_id,
                    "Deadlock while appending clock event, reporting conflict"
                );
                Ok(AppendOutcome::Conflict)
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn history(
        &self,
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Option<Uuid>,
        limit: usize,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = match location_id {
            Some(location_id) => {
                let sql = format!(
                    "SELECT {EVENT_COLUMNS} FROM rcp_clock_events e \
                     WHERE e.worker_id = ? AND e.organization_id = ? AND e.location_id = ? \
                     ORDER BY e.seq DESC LIMIT ?"
                );
                sqlx::query(&sql)
                    .bind(worker_id.to_string())
                    .bind(organization_id.to_string())
                    .bind(location_id.to_string())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {EVENT_COLUMNS} FROM rcp_clock_events e \
                     WHERE e.worker_id = ? AND e.organization_id = ? \
                     ORDER BY e.seq DESC LIMIT ?"
                );
                sqlx::query(&sql)
                    .bind(worker_id.to_string())
                    .bind(organization_id.to_string())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_event).collect()
    }
}
