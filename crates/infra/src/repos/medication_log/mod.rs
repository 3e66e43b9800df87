mod inmemory;
mod postgres;

use health_companion_domain::{CivilDay, MedicationLog, ID};
pub use inmemory::InMemoryMedicationLogRepo;
pub use postgres::PostgresMedicationLogRepo;

/// Append-only, logs are never updated
#[async_trait::async_trait]
pub trait IMedicationLogRepo: Send + Sync {
    async fn insert(&self, log: &MedicationLog) -> anyhow::Result<()>;
    async fn find_by_medication(&self, medication_id: &ID) -> anyhow::Result<Vec<MedicationLog>>;
    /// Whether the `User` logged the `Medication` as taken at any instant
    /// falling on the given civil day
    async fn exists_on_day(
        &self,
        user_id: &ID,
        medication_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<bool>;
    /// Every log of the `User` taken at an instant falling on the given
    /// civil day, oldest first
    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<MedicationLog>>;
    async fn delete_by_medication(&self, medication_id: &ID) -> anyhow::Result<u64>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64>;
}
