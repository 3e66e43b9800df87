use super::IContactRepo;
use crate::repos::shared::inmemory_repo::*;
use health_companion_domain::{EmergencyContact, ID};

pub struct InMemoryContactRepo {
    contacts: std::sync::Mutex<Vec<EmergencyContact>>,
}

impl InMemoryContactRepo {
    pub fn new() -> Self {
        Self {
            contacts: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IContactRepo for InMemoryContactRepo {
    async fn insert(&self, contact: &EmergencyContact) -> anyhow::Result<()> {
        insert(contact, &self.contacts);
        Ok(())
    }

    async fn save(&self, contact: &EmergencyContact) -> anyhow::Result<()> {
        save(contact, &self.contacts);
        Ok(())
    }

    async fn delete(&self, contact_id: &ID) -> Option<EmergencyContact> {
        delete(contact_id, &self.contacts)
    }

    async fn find(&self, contact_id: &ID) -> Option<EmergencyContact> {
        find(contact_id, &self.contacts)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<EmergencyContact>> {
        Ok(find_by_owner(user_id, &self.contacts))
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(delete_by_owner(user_id, &self.contacts))
    }
}
