use super::mark_medication_taken::MarkMedicationTakenUseCase;
use crate::shared::usecase::Subscriber;
use health_companion_domain::MedicationLog;
use health_companion_infra::HealthContext;
use tracing::warn;

pub struct UpdateLastTakenOnMedicationTaken;

#[async_trait::async_trait(?Send)]
impl Subscriber<MarkMedicationTakenUseCase> for UpdateLastTakenOnMedicationTaken {
    async fn notify(&self, log: &MedicationLog, ctx: &HealthContext) {
        let mut medication = match ctx.repos.medications.find(&log.medication_id).await {
            Some(medication) => medication,
            None => return,
        };
        // Logs can be recorded out of order
        if medication.last_taken_at.map_or(true, |last| last < log.taken_at) {
            medication.last_taken_at = Some(log.taken_at);
            if let Err(e) = ctx.repos.medications.save(&medication).await {
                warn!(
                    "Unable to update last taken time of medication: {}. Error: {:?}",
                    medication.id, e
                );
            }
        }
    }
}
