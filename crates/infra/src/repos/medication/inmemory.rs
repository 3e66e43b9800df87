use super::IMedicationRepo;
use crate::repos::shared::inmemory_repo::*;
use health_companion_domain::{Medication, ID};

pub struct InMemoryMedicationRepo {
    medications: std::sync::Mutex<Vec<Medication>>,
}

impl InMemoryMedicationRepo {
    pub fn new() -> Self {
        Self {
            medications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationRepo for InMemoryMedicationRepo {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()> {
        insert(medication, &self.medications);
        Ok(())
    }

    async fn save(&self, medication: &Medication) -> anyhow::Result<()> {
        save(medication, &self.medications);
        Ok(())
    }

    async fn delete(&self, medication_id: &ID) -> Option<Medication> {
        delete(medication_id, &self.medications)
    }

    async fn find(&self, medication_id: &ID) -> Option<Medication> {
        find(medication_id, &self.medications)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Medication>> {
        Ok(find_by_owner(user_id, &self.medications))
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(delete_by_owner(user_id, &self.medications))
    }
}
