use crate::shared::usecase::UseCase;
use health_companion_domain::{Appointment, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct DeleteAppointmentUseCase {
    pub user_id: ID,
    pub appointment_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointment: Appointment,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAppointmentUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAppointment";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.appointments.find(&self.appointment_id).await {
            Some(appointment) if appointment.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.appointment_id.clone())),
        };

        match ctx.repos.appointments.delete(&self.appointment_id).await {
            Some(appointment) => Ok(UseCaseRes { appointment }),
            None => Err(UseCaseError::NotFound(self.appointment_id.clone())),
        }
    }
}
