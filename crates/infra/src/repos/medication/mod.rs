mod inmemory;
mod postgres;

use health_companion_domain::{Medication, ID};
pub use inmemory::InMemoryMedicationRepo;
pub use postgres::PostgresMedicationRepo;

#[async_trait::async_trait]
pub trait IMedicationRepo: Send + Sync {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()>;
    async fn save(&self, medication: &Medication) -> anyhow::Result<()>;
    async fn delete(&self, medication_id: &ID) -> Option<Medication>;
    async fn find(&self, medication_id: &ID) -> Option<Medication>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Medication>>;
    /// Returns the number of deleted `Medication`s
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64>;
}
