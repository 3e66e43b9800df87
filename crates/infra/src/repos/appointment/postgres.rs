use super::IAppointmentRepo;
use chrono::{DateTime, Utc};
use health_companion_domain::{Appointment, CivilDay, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    user_uid: Uuid,
    doctor_name: String,
    purpose: Option<String>,
    location: Option<String>,
    appointment_datetime: DateTime<Utc>,
}

impl From<AppointmentRaw> for Appointment {
    fn from(raw: AppointmentRaw) -> Self {
        Self {
            id: raw.appointment_uid.into(),
            user_id: raw.user_uid.into(),
            doctor_name: raw.doctor_name,
            purpose: raw.purpose,
            location: raw.location,
            appointment_datetime: raw.appointment_datetime,
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments(appointment_uid, user_uid, doctor_name, purpose, location, appointment_datetime)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.user_id.inner_ref())
        .bind(&appointment.doctor_name)
        .bind(&appointment.purpose)
        .bind(&appointment.location)
        .bind(appointment.appointment_datetime)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET doctor_name = $2,
            purpose = $3,
            location = $4,
            appointment_datetime = $5
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(&appointment.doctor_name)
        .bind(&appointment.purpose)
        .bind(&appointment.location)
        .bind(appointment.appointment_datetime)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, appointment_id: &ID) -> Option<Appointment> {
        sqlx::query_as::<_, AppointmentRaw>(
            r#"
            DELETE FROM appointments AS a
            WHERE a.appointment_uid = $1
            RETURNING *
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|a| a.into())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|a| a.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.user_uid = $1
            ORDER BY a.appointment_datetime
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.user_uid = $1 AND
            a.appointment_datetime >= $2 AND
            a.appointment_datetime < $3
            ORDER BY a.appointment_datetime
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(day.start())
        .bind(day.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM appointments AS a
            WHERE a.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
