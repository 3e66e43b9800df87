use super::IHealthTipRepo;
use health_companion_domain::{HealthTip, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresHealthTipRepo {
    pool: PgPool,
}

impl PostgresHealthTipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HealthTipRaw {
    tip_uid: Uuid,
    tip_text: String,
    category: String,
}

impl From<HealthTipRaw> for HealthTip {
    fn from(raw: HealthTipRaw) -> Self {
        Self {
            id: raw.tip_uid.into(),
            tip_text: raw.tip_text,
            category: raw.category,
        }
    }
}

#[async_trait::async_trait]
impl IHealthTipRepo for PostgresHealthTipRepo {
    async fn insert(&self, tip: &HealthTip) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO health_tips(tip_uid, tip_text, category)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(tip.id.inner_ref())
        .bind(&tip.tip_text)
        .bind(&tip.category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, tip: &HealthTip) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE health_tips
            SET tip_text = $2,
            category = $3
            WHERE tip_uid = $1
            "#,
        )
        .bind(tip.id.inner_ref())
        .bind(&tip.tip_text)
        .bind(&tip.category)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, tip_id: &ID) -> Option<HealthTip> {
        sqlx::query_as::<_, HealthTipRaw>(
            r#"
            DELETE FROM health_tips AS t
            WHERE t.tip_uid = $1
            RETURNING *
            "#,
        )
        .bind(tip_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|t| t.into())
    }

    async fn find(&self, tip_id: &ID) -> Option<HealthTip> {
        sqlx::query_as::<_, HealthTipRaw>(
            r#"
            SELECT * FROM health_tips AS t
            WHERE t.tip_uid = $1
            "#,
        )
        .bind(tip_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|t| t.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<HealthTip>> {
        let tips = sqlx::query_as::<_, HealthTipRaw>(
            r#"
            SELECT * FROM health_tips AS t
            ORDER BY t.category, t.tip_text
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tips.into_iter().map(|t| t.into()).collect())
    }

    async fn find_random(&self) -> Option<HealthTip> {
        sqlx::query_as::<_, HealthTipRaw>(
            r#"
            SELECT * FROM health_tips AS t
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|t| t.into())
    }
}
