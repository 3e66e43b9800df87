mod inmemory;
mod postgres;

use health_companion_domain::{Appointment, CivilDay, ID};
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn delete(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    /// Ordered by `appointment_datetime`
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>>;
    /// `Appointment`s falling on the given civil day, ordered by time
    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<Appointment>>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64>;
}
