use super::validate_field;
use crate::shared::usecase::UseCase;
use chrono::NaiveTime;
use health_companion_domain::{
    FrequencyRule, InvalidFrequencyRule, InvalidMedicationTiming, Medication, MedicationTiming, ID,
};
use health_companion_infra::HealthContext;
use serde_json::Value;

/// Updates a `Medication` owned by the `User`.
///
/// The timing is replaced only when `timing_type` is given and the frequency
/// rule only when `frequency_type` is given, each then together with its
/// details.
#[derive(Debug, Default)]
pub struct UpdateMedicationUseCase {
    pub user_id: ID,
    pub medication_id: ID,
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub timing_type: Option<String>,
    pub meal_timing: Option<String>,
    pub specific_time: Option<NaiveTime>,
    pub frequency_type: Option<String>,
    pub frequency_details: Option<Value>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub medication: Medication,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    InvalidName,
    InvalidDosage,
    InvalidTiming(InvalidMedicationTiming),
    InvalidFrequency(InvalidFrequencyRule),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMedicationUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateMedication";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let mut medication = match ctx.repos.medications.find(&self.medication_id).await {
            Some(medication) if medication.user_id == self.user_id => medication,
            _ => return Err(UseCaseError::NotFound(self.medication_id.clone())),
        };

        if let Some(name) = &self.name {
            medication.name = validate_field(name).ok_or(UseCaseError::InvalidName)?;
        }
        if let Some(dosage) = &self.dosage {
            medication.dosage = validate_field(dosage).ok_or(UseCaseError::InvalidDosage)?;
        }
        if let Some(timing_type) = &self.timing_type {
            medication.timing = MedicationTiming::parse(
                timing_type,
                self.meal_timing.as_deref(),
                self.specific_time,
            )
            .map_err(UseCaseError::InvalidTiming)?;
        }
        if let Some(frequency_type) = &self.frequency_type {
            medication.frequency =
                FrequencyRule::parse(frequency_type, self.frequency_details.as_ref())
                    .map_err(UseCaseError::InvalidFrequency)?;
        }

        ctx.repos
            .medications
            .save(&medication)
            .await
            .map(|_| UseCaseRes { medication })
            .map_err(|_| UseCaseError::StorageError)
    }
}
