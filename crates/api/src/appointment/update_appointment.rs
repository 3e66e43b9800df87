use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use health_companion_domain::{Appointment, ID};
use health_companion_infra::HealthContext;

/// Updates an `Appointment` owned by the `User`, only the given fields change
#[derive(Debug, Default)]
pub struct UpdateAppointmentUseCase {
    pub user_id: ID,
    pub appointment_id: ID,
    pub doctor_name: Option<String>,
    pub purpose: Option<String>,
    pub location: Option<String>,
    pub appointment_datetime: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointment: Appointment,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    InvalidDoctorName,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAppointmentUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAppointment";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let mut appointment = match ctx.repos.appointments.find(&self.appointment_id).await {
            Some(appointment) if appointment.user_id == self.user_id => appointment,
            _ => return Err(UseCaseError::NotFound(self.appointment_id.clone())),
        };

        if let Some(doctor_name) = &self.doctor_name {
            let doctor_name = doctor_name.trim();
            if doctor_name.is_empty() {
                return Err(UseCaseError::InvalidDoctorName);
            }
            appointment.doctor_name = doctor_name.to_string();
        }
        if let Some(purpose) = &self.purpose {
            appointment.purpose = Some(purpose.clone());
        }
        if let Some(location) = &self.location {
            appointment.location = Some(location.clone());
        }
        if let Some(appointment_datetime) = self.appointment_datetime {
            appointment.appointment_datetime = appointment_datetime;
        }

        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map(|_| UseCaseRes { appointment })
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use health_companion_domain::{CivilDay, INDIA_STANDARD_TIME};

    async fn setup() -> (HealthContext, Appointment) {
        let ctx = HealthContext::create_inmemory();
        let appointment = Appointment::new(
            ID::default(),
            "Mehta".into(),
            // 2024-01-16 14:00 IST
            Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap(),
        );
        ctx.repos.appointments.insert(&appointment).await.unwrap();
        (ctx, appointment)
    }

    #[actix_web::test]
    async fn reschedules_appointment() {
        let (ctx, appointment) = setup().await;
        // 2024-01-17 10:00 IST
        let rescheduled = Utc.with_ymd_and_hms(2024, 1, 17, 4, 30, 0).unwrap();
        let mut usecase = UpdateAppointmentUseCase {
            user_id: appointment.user_id.clone(),
            appointment_id: appointment.id.clone(),
            location: Some("City Hospital".into()),
            appointment_datetime: Some(rescheduled),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.appointment.doctor_name, "Mehta");
        assert_eq!(res.appointment.location.as_deref(), Some("City Hospital"));

        let day = |d| {
            CivilDay::new(
                chrono::NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                INDIA_STANDARD_TIME,
            )
        };
        let user_id = &appointment.user_id;
        let appointments = &ctx.repos.appointments;
        assert!(appointments
            .find_by_user_on_day(user_id, &day(16))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            appointments
                .find_by_user_on_day(user_id, &day(17))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[actix_web::test]
    async fn only_owner_can_update() {
        let (ctx, appointment) = setup().await;
        let mut usecase = UpdateAppointmentUseCase {
            user_id: ID::default(),
            appointment_id: appointment.id.clone(),
            doctor_name: Some("Sharma".into()),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(appointment.id.clone())
        );

        usecase.user_id = appointment.user_id.clone();
        usecase.doctor_name = Some("  ".into());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidDoctorName
        );
        let stored = ctx.repos.appointments.find(&appointment.id).await.unwrap();
        assert_eq!(stored.doctor_name, "Mehta");
    }
}
