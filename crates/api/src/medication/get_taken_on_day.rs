use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use health_companion_domain::{CivilDay, ID};
use health_companion_infra::HealthContext;

/// Ids of the `Medication`s the `User` marked as taken on a civil date in
/// the reminder timezone. Each id is listed once.
#[derive(Debug)]
pub struct GetTakenOnDayUseCase {
    pub user_id: ID,
    pub date: NaiveDate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTakenOnDayUseCase {
    type Response = Vec<ID>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetTakenOnDay";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let day = CivilDay::new(self.date, ctx.config.reminder_timezone);
        let logs = ctx
            .repos
            .medication_logs
            .find_by_user_on_day(&self.user_id, &day)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut medication_ids: Vec<ID> = Vec::with_capacity(logs.len());
        for log in logs {
            if !medication_ids.contains(&log.medication_id) {
                medication_ids.push(log.medication_id);
            }
        }
        Ok(medication_ids)
    }
}
