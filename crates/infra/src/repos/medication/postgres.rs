use super::IMedicationRepo;
use chrono::{DateTime, NaiveTime, Utc};
use health_companion_domain::{FrequencyRule, Medication, MedicationTiming, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::warn;

pub struct PostgresMedicationRepo {
    pool: PgPool,
}

impl PostgresMedicationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MedicationRaw {
    medication_uid: Uuid,
    user_uid: Uuid,
    name: String,
    dosage: String,
    timing_type: String,
    meal_timing: Option<String>,
    specific_time: Option<NaiveTime>,
    frequency_type: String,
    frequency_details: Option<serde_json::Value>,
    last_taken_at: Option<DateTime<Utc>>,
}

impl TryFrom<MedicationRaw> for Medication {
    type Error = anyhow::Error;

    fn try_from(raw: MedicationRaw) -> anyhow::Result<Self> {
        let frequency = FrequencyRule::parse(&raw.frequency_type, raw.frequency_details.as_ref())?;
        Ok(Self {
            id: raw.medication_uid.into(),
            user_id: raw.user_uid.into(),
            name: raw.name,
            dosage: raw.dosage,
            timing: MedicationTiming::from_stored(
                &raw.timing_type,
                raw.meal_timing.as_deref(),
                raw.specific_time,
            ),
            frequency,
            last_taken_at: raw.last_taken_at,
        })
    }
}

/// Rows with a malformed frequency rule are skipped, such a `Medication` is
/// never due.
fn parse_rows(rows: Vec<MedicationRaw>) -> Vec<Medication> {
    rows.into_iter()
        .filter_map(|raw| {
            let medication_id = raw.medication_uid;
            match Medication::try_from(raw) {
                Ok(medication) => Some(medication),
                Err(e) => {
                    warn!(
                        "Skipping medication: {} with malformed frequency rule: {}",
                        medication_id, e
                    );
                    None
                }
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl IMedicationRepo for PostgresMedicationRepo {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medications(medication_uid, user_uid, name, dosage, timing_type, meal_timing, specific_time, frequency_type, frequency_details, last_taken_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(medication.id.inner_ref())
        .bind(medication.user_id.inner_ref())
        .bind(&medication.name)
        .bind(&medication.dosage)
        .bind(medication.timing.timing_type())
        .bind(medication.timing.meal_timing())
        .bind(medication.timing.specific_time())
        .bind(medication.frequency.frequency_type())
        .bind(medication.frequency.details())
        .bind(medication.last_taken_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, medication: &Medication) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE medications
            SET name = $2,
            dosage = $3,
            timing_type = $4,
            meal_timing = $5,
            specific_time = $6,
            frequency_type = $7,
            frequency_details = $8,
            last_taken_at = $9
            WHERE medication_uid = $1
            "#,
        )
        .bind(medication.id.inner_ref())
        .bind(&medication.name)
        .bind(&medication.dosage)
        .bind(medication.timing.timing_type())
        .bind(medication.timing.meal_timing())
        .bind(medication.timing.specific_time())
        .bind(medication.frequency.frequency_type())
        .bind(medication.frequency.details())
        .bind(medication.last_taken_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, medication_id: &ID) -> Option<Medication> {
        let raw = sqlx::query_as::<_, MedicationRaw>(
            r#"
            DELETE FROM medications AS m
            WHERE m.medication_uid = $1
            RETURNING *
            "#,
        )
        .bind(medication_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()?;
        parse_rows(vec![raw]).pop()
    }

    async fn find(&self, medication_id: &ID) -> Option<Medication> {
        let raw = sqlx::query_as::<_, MedicationRaw>(
            r#"
            SELECT * FROM medications AS m
            WHERE m.medication_uid = $1
            "#,
        )
        .bind(medication_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()?;
        parse_rows(vec![raw]).pop()
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Medication>> {
        let rows = sqlx::query_as::<_, MedicationRaw>(
            r#"
            SELECT * FROM medications AS m
            WHERE m.user_uid = $1
            ORDER BY m.name
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(parse_rows(rows))
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM medications AS m
            WHERE m.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
