use crate::{
    civil_day::CivilDay,
    shared::entity::{Entity, Owned, ID},
};
use chrono::{DateTime, Utc};

/// Append-only record that a `Medication` was marked as taken
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationLog {
    pub id: ID,
    pub medication_id: ID,
    pub user_id: ID,
    pub taken_at: DateTime<Utc>,
}

impl MedicationLog {
    pub fn new(medication_id: ID, user_id: ID, taken_at: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            medication_id,
            user_id,
            taken_at,
        }
    }

    pub fn is_taken_on(&self, day: &CivilDay) -> bool {
        day.contains(&self.taken_at)
    }
}

impl Entity for MedicationLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for MedicationLog {
    fn owner_id(&self) -> &ID {
        &self.user_id
    }
}
