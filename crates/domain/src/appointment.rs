use crate::{
    civil_day::CivilDay,
    shared::entity::{Entity, Owned, ID},
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: ID,
    pub user_id: ID,
    pub doctor_name: String,
    pub purpose: Option<String>,
    pub location: Option<String>,
    pub appointment_datetime: DateTime<Utc>,
}

impl Appointment {
    pub fn new(user_id: ID, doctor_name: String, appointment_datetime: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            doctor_name,
            purpose: None,
            location: None,
            appointment_datetime,
        }
    }

    pub fn is_on(&self, day: &CivilDay) -> bool {
        day.contains(&self.appointment_datetime)
    }

    /// Local wall-clock time of the appointment in 12 hour format, e.g. "02:00 PM"
    pub fn local_time(&self, day: &CivilDay) -> String {
        day.to_local(&self.appointment_datetime)
            .format("%I:%M %p")
            .to_string()
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Appointment {
    fn owner_id(&self) -> &ID {
        &self.user_id
    }
}
