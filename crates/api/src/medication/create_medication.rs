use super::validate_field;
use crate::shared::usecase::UseCase;
use chrono::NaiveTime;
use health_companion_domain::{
    FrequencyRule, InvalidFrequencyRule, InvalidMedicationTiming, Medication, MedicationTiming, ID,
};
use health_companion_infra::HealthContext;
use serde_json::Value;

/// Adds a `Medication` from its raw form fields
#[derive(Debug)]
pub struct CreateMedicationUseCase {
    pub user_id: ID,
    pub name: String,
    pub dosage: String,
    pub timing_type: String,
    pub meal_timing: Option<String>,
    pub specific_time: Option<NaiveTime>,
    pub frequency_type: String,
    pub frequency_details: Option<Value>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub medication: Medication,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
    InvalidName,
    InvalidDosage,
    InvalidTiming(InvalidMedicationTiming),
    InvalidFrequency(InvalidFrequencyRule),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMedicationUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateMedication";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let name = validate_field(&self.name).ok_or(UseCaseError::InvalidName)?;
        let dosage = validate_field(&self.dosage).ok_or(UseCaseError::InvalidDosage)?;
        let timing = MedicationTiming::parse(
            &self.timing_type,
            self.meal_timing.as_deref(),
            self.specific_time,
        )
        .map_err(UseCaseError::InvalidTiming)?;
        let frequency = FrequencyRule::parse(&self.frequency_type, self.frequency_details.as_ref())
            .map_err(UseCaseError::InvalidFrequency)?;

        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let medication = Medication::new(self.user_id.clone(), name, dosage, timing, frequency);
        ctx.repos
            .medications
            .insert(&medication)
            .await
            .map(|_| UseCaseRes { medication })
            .map_err(|_| UseCaseError::StorageError)
    }
}
