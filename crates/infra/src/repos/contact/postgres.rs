use super::IContactRepo;
use health_companion_domain::{EmergencyContact, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresContactRepo {
    pool: PgPool,
}

impl PostgresContactRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRaw {
    contact_uid: Uuid,
    user_uid: Uuid,
    contact_name: String,
    phone_number: String,
    relationship_type: Option<String>,
}

impl From<ContactRaw> for EmergencyContact {
    fn from(raw: ContactRaw) -> Self {
        Self {
            id: raw.contact_uid.into(),
            user_id: raw.user_uid.into(),
            contact_name: raw.contact_name,
            phone_number: raw.phone_number,
            relationship_type: raw.relationship_type,
        }
    }
}

#[async_trait::async_trait]
impl IContactRepo for PostgresContactRepo {
    async fn insert(&self, contact: &EmergencyContact) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO emergency_contacts(contact_uid, user_uid, contact_name, phone_number, relationship_type)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(contact.id.inner_ref())
        .bind(contact.user_id.inner_ref())
        .bind(&contact.contact_name)
        .bind(&contact.phone_number)
        .bind(&contact.relationship_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, contact: &EmergencyContact) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE emergency_contacts
            SET contact_name = $2,
            phone_number = $3,
            relationship_type = $4
            WHERE contact_uid = $1
            "#,
        )
        .bind(contact.id.inner_ref())
        .bind(&contact.contact_name)
        .bind(&contact.phone_number)
        .bind(&contact.relationship_type)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, contact_id: &ID) -> Option<EmergencyContact> {
        sqlx::query_as::<_, ContactRaw>(
            r#"
            DELETE FROM emergency_contacts AS c
            WHERE c.contact_uid = $1
            RETURNING *
            "#,
        )
        .bind(contact_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|c| c.into())
    }

    async fn find(&self, contact_id: &ID) -> Option<EmergencyContact> {
        sqlx::query_as::<_, ContactRaw>(
            r#"
            SELECT * FROM emergency_contacts AS c
            WHERE c.contact_uid = $1
            "#,
        )
        .bind(contact_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|c| c.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<EmergencyContact>> {
        let contacts = sqlx::query_as::<_, ContactRaw>(
            r#"
            SELECT * FROM emergency_contacts AS c
            WHERE c.user_uid = $1
            ORDER BY c.contact_name
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts.into_iter().map(|c| c.into()).collect())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM emergency_contacts AS c
            WHERE c.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
