//! Postgres-backed stores

use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, Pool, Postgres, Row};
use uuid::Uuid;

use super::{BreakdownStore, SparePartStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        Breakdown, BreakdownCategory, CreateSparePart, NewBreakdown, SpareConsumption, SparePart,
        UpdateSparePart,
    },
};

#[derive(Clone)]
pub struct PgSparePartStore {
    pool: Pool<Postgres>,
}

impl PgSparePartStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SparePartStore for PgSparePartStore {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        let rows = sqlx::query_as::<_, SparePart>(
            "SELECT * FROM spare_parts ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        let row = sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &CreateSparePart) -> AppResult<SparePart> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, SparePart>(
            r#"
            INSERT INTO spare_parts (id, part_number, description, quantity, location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.part_number)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(&input.location)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &UpdateSparePart) -> AppResult<Option<SparePart>> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(patch.part_number, "part_number");
        add_field!(patch.description, "description");
        add_field!(patch.quantity, "quantity");
        add_field!(patch.location, "location");

        let query = format!(
            "UPDATE spare_parts SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, SparePart>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(patch.part_number);
        bind_field!(patch.description);
        bind_field!(patch.quantity);
        bind_field!(patch.location);

        let row = builder.bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgBreakdownStore {
    pool: Pool<Postgres>,
}

impl PgBreakdownStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a breakdowns row, decoding the JSONB consumption snapshots and the
/// category stored as text
fn map_breakdown_row(row: PgRow) -> AppResult<Breakdown> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<BreakdownCategory>()
        .map_err(AppError::Internal)?;
    let Json(spares_consumed): Json<Vec<SpareConsumption>> = row.try_get("spares_consumed")?;

    Ok(Breakdown {
        id: row.try_get("id")?,
        loss_time: row.try_get("loss_time")?,
        line: row.try_get("line")?,
        machine: row.try_get("machine")?,
        description: row.try_get("description")?,
        category,
        spares_consumed,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl BreakdownStore for PgBreakdownStore {
    async fn list(&self) -> AppResult<Vec<Breakdown>> {
        let rows = sqlx::query("SELECT * FROM breakdowns ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_breakdown_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Breakdown>> {
        let row = sqlx::query("SELECT * FROM breakdowns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_breakdown_row).transpose()
    }

    async fn create(&self, record: &NewBreakdown) -> AppResult<Breakdown> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO breakdowns (id, loss_time, line, machine, description, category, spares_consumed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.loss_time)
        .bind(&record.line)
        .bind(&record.machine)
        .bind(&record.description)
        .bind(record.category.as_str())
        .bind(Json(&record.spares_consumed))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        map_breakdown_row(row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM breakdowns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
