use super::subscribers::UpdateLastTakenOnMedicationTaken;
use crate::shared::usecase::{Subscriber, UseCase};
use health_companion_domain::{MedicationLog, ID};
use health_companion_infra::HealthContext;

/// Records that the `User` took a dose of the `Medication` just now
#[derive(Debug)]
pub struct MarkMedicationTakenUseCase {
    pub user_id: ID,
    pub medication_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkMedicationTakenUseCase {
    type Response = MedicationLog;
    type Error = UseCaseError;

    const NAME: &'static str = "MarkMedicationTaken";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.medications.find(&self.medication_id).await {
            Some(medication) if medication.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.medication_id.clone())),
        };

        let log = MedicationLog::new(
            self.medication_id.clone(),
            self.user_id.clone(),
            ctx.sys.now(),
        );
        ctx.repos
            .medication_logs
            .insert(&log)
            .await
            .map(|_| log)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(UpdateLastTakenOnMedicationTaken)]
    }
}
