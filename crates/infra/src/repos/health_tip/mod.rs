mod inmemory;
mod postgres;

use health_companion_domain::{HealthTip, ID};
pub use inmemory::InMemoryHealthTipRepo;
pub use postgres::PostgresHealthTipRepo;

#[async_trait::async_trait]
pub trait IHealthTipRepo: Send + Sync {
    async fn insert(&self, tip: &HealthTip) -> anyhow::Result<()>;
    async fn save(&self, tip: &HealthTip) -> anyhow::Result<()>;
    async fn delete(&self, tip_id: &ID) -> Option<HealthTip>;
    async fn find(&self, tip_id: &ID) -> Option<HealthTip>;
    async fn find_all(&self) -> anyhow::Result<Vec<HealthTip>>;
    /// A random tip, `None` when there are no tips at all
    async fn find_random(&self) -> Option<HealthTip>;
}
