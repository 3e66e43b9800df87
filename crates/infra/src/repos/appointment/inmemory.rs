use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::*;
use health_companion_domain::{Appointment, CivilDay, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(vec![]),
        }
    }
}

fn sorted(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by_key(|a| a.appointment_datetime);
    appointments
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        save(appointment, &self.appointments);
        Ok(())
    }

    async fn delete(&self, appointment_id: &ID) -> Option<Appointment> {
        delete(appointment_id, &self.appointments)
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        Ok(sorted(find_by_owner(user_id, &self.appointments)))
    }

    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<Appointment>> {
        let appointments = find_by(&self.appointments, |a| {
            a.user_id == *user_id && a.is_on(day)
        });
        Ok(sorted(appointments))
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(delete_by_owner(user_id, &self.appointments))
    }
}
