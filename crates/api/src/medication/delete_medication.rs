use crate::shared::usecase::UseCase;
use health_companion_domain::{Medication, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct DeleteMedicationUseCase {
    pub user_id: ID,
    pub medication_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub medication: Medication,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteMedicationUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteMedication";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.medications.find(&self.medication_id).await {
            Some(medication) if medication.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.medication_id.clone())),
        };

        ctx.repos
            .medication_logs
            .delete_by_medication(&self.medication_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match ctx.repos.medications.delete(&self.medication_id).await {
            Some(medication) => Ok(UseCaseRes { medication }),
            None => Err(UseCaseError::NotFound(self.medication_id.clone())),
        }
    }
}
