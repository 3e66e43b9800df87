mod appointment;
mod contact;
mod health_tip;
mod medication;
mod medication_log;
mod shared;
mod user;

pub use appointment::IAppointmentRepo;
use appointment::{InMemoryAppointmentRepo, PostgresAppointmentRepo};
pub use contact::IContactRepo;
use contact::{InMemoryContactRepo, PostgresContactRepo};
pub use health_tip::IHealthTipRepo;
use health_tip::{InMemoryHealthTipRepo, PostgresHealthTipRepo};
pub use medication::IMedicationRepo;
use medication::{InMemoryMedicationRepo, PostgresMedicationRepo};
pub use medication_log::IMedicationLogRepo;
use medication_log::{InMemoryMedicationLogRepo, PostgresMedicationLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub medications: Arc<dyn IMedicationRepo>,
    pub medication_logs: Arc<dyn IMedicationLogRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub contacts: Arc<dyn IContactRepo>,
    pub health_tips: Arc<dyn IHealthTipRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> Result<Self, sqlx::Error> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            medications: Arc::new(PostgresMedicationRepo::new(pool.clone())),
            medication_logs: Arc::new(PostgresMedicationLogRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            contacts: Arc::new(PostgresContactRepo::new(pool.clone())),
            health_tips: Arc::new(PostgresHealthTipRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            medications: Arc::new(InMemoryMedicationRepo::new()),
            medication_logs: Arc::new(InMemoryMedicationLogRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            contacts: Arc::new(InMemoryContactRepo::new()),
            health_tips: Arc::new(InMemoryHealthTipRepo::new()),
        }
    }
}
