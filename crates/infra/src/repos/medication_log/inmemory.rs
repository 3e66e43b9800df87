use super::IMedicationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use health_companion_domain::{CivilDay, MedicationLog, ID};

pub struct InMemoryMedicationLogRepo {
    logs: std::sync::Mutex<Vec<MedicationLog>>,
}

impl InMemoryMedicationLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationLogRepo for InMemoryMedicationLogRepo {
    async fn insert(&self, log: &MedicationLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_medication(&self, medication_id: &ID) -> anyhow::Result<Vec<MedicationLog>> {
        Ok(find_by(&self.logs, |log| log.medication_id == *medication_id))
    }

    async fn exists_on_day(
        &self,
        user_id: &ID,
        medication_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<bool> {
        let logs = find_by(&self.logs, |log| {
            log.user_id == *user_id && log.medication_id == *medication_id && log.is_taken_on(day)
        });
        Ok(!logs.is_empty())
    }

    async fn find_by_user_on_day(
        &self,
        user_id: &ID,
        day: &CivilDay,
    ) -> anyhow::Result<Vec<MedicationLog>> {
        let mut logs = find_by(&self.logs, |log| {
            log.user_id == *user_id && log.is_taken_on(day)
        });
        logs.sort_by_key(|log| log.taken_at);
        Ok(logs)
    }

    async fn delete_by_medication(&self, medication_id: &ID) -> anyhow::Result<u64> {
        let deleted = find_and_delete_by(&self.logs, |log| log.medication_id == *medication_id);
        Ok(deleted.len() as u64)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(delete_by_owner(user_id, &self.logs))
    }
}
