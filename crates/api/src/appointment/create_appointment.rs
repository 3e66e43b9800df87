use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use health_companion_domain::{Appointment, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct CreateAppointmentUseCase {
    pub user_id: ID,
    pub doctor_name: String,
    pub purpose: Option<String>,
    pub location: Option<String>,
    pub appointment_datetime: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointment: Appointment,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
    InvalidDoctorName,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAppointmentUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateAppointment";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let doctor_name = self.doctor_name.trim();
        if doctor_name.is_empty() {
            return Err(UseCaseError::InvalidDoctorName);
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let mut appointment = Appointment::new(
            self.user_id.clone(),
            doctor_name.to_string(),
            self.appointment_datetime,
        );
        appointment.purpose = self.purpose.clone();
        appointment.location = self.location.clone();

        ctx.repos
            .appointments
            .insert(&appointment)
            .await
            .map(|_| UseCaseRes { appointment })
            .map_err(|_| UseCaseError::StorageError)
    }
}
