use super::IMedicationLogRepo;
use chrono::{DateTime, Utc};
use health_companion_domain::{CivilDay, MedicationLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMedicationLogRepo {
    pool: PgPool,
}

impl PostgresMedicationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MedicationLogRaw {
    log_uid: Uuid,
    medication_uid: Uuid,
    user_uid: Uuid,
    taken_at: DateTime<Utc>,
}

impl From<MedicationLogRaw> for MedicationLog {
    fn from(raw: MedicationLogRaw) -> Self {
        Self {
            id: raw.log_uid.into(),
            medication_id: raw.medication_uid.into(),
            user_id: raw.user_uid.into(),
            taken_at: raw.taken_at,
        }
    }
}

#[async_trait::async_trait]
impl IMedicationLogRepo for PostgresMedicationLogRepo {
    async fn insert(&self, log: &MedicationLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medication_logs(log_uid, medication_uid, user_uid, taken_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.medication_id.inner_ref())
        .bind(log.user_id.inner_ref())
        .bind(log.taken_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_medication(&self, medication_id: &ID) -> anyhow::Result<Vec<MedicationLog>> {
        let logs = sqlx::query_as::<_, MedicationLogRaw>(
            r#"
            SELECT * FROM medication_logs AS l
            WHERE l.medication_uid = $1
            ORDER BY l.taken_at DESC
            "#,
        )
        .bind(medication_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(logs.into_iter().map(|l| l.into()).collect())
    }

    async fn exists_on_day(
        &self,
        user_id: &ID,
        medication_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<bool> {
        // `taken_at` is a TIMESTAMPTZ, the civil day is converted into its
        // UTC bounds instead of converting every row.
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM medication_logs AS l
                WHERE l.user_uid = $1 AND
                l.medication_uid = $2 AND
                l.taken_at >= $3 AND
                l.taken_at < $4
            )
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(medication_id.inner_ref())
        .bind(day.start())
        .bind(day.end())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<MedicationLog>> {
        let logs = sqlx::query_as::<_, MedicationLogRaw>(
            r#"
            SELECT * FROM medication_logs AS l
            WHERE l.user_uid = $1 AND
            l.taken_at >= $2 AND
            l.taken_at < $3
            ORDER BY l.taken_at
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(day.start())
        .bind(day.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(logs.into_iter().map(|l| l.into()).collect())
    }

    async fn delete_by_medication(&self, medication_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM medication_logs AS l
            WHERE l.medication_uid = $1
            "#,
        )
        .bind(medication_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM medication_logs AS l
            WHERE l.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
