mod inmemory;
mod postgres;

use health_companion_domain::{EmergencyContact, ID};
pub use inmemory::InMemoryContactRepo;
pub use postgres::PostgresContactRepo;

#[async_trait::async_trait]
pub trait IContactRepo: Send + Sync {
    async fn insert(&self, contact: &EmergencyContact) -> anyhow::Result<()>;
    async fn save(&self, contact: &EmergencyContact) -> anyhow::Result<()>;
    async fn delete(&self, contact_id: &ID) -> Option<EmergencyContact>;
    async fn find(&self, contact_id: &ID) -> Option<EmergencyContact>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<EmergencyContact>>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<u64>;
}

#[cfg(test)]
mod tests {
    use crate::HealthContext;
    use health_companion_domain::{EmergencyContact, ID};

    #[tokio::test]
    async fn saves_contact_changes() {
        let ctx = HealthContext::create_inmemory();
        let mut contact =
            EmergencyContact::new(ID::default(), "Priya".into(), "9876543210".into());
        ctx.repos.contacts.insert(&contact).await.unwrap();

        contact.phone_number = "+91 98765 00000".into();
        contact.relationship_type = Some("Daughter".into());
        ctx.repos.contacts.save(&contact).await.unwrap();

        let stored = ctx.repos.contacts.find(&contact.id).await.unwrap();
        assert_eq!(stored.phone_number, "+91 98765 00000");
        assert_eq!(stored.relationship_type.as_deref(), Some("Daughter"));
        assert_eq!(
            ctx.repos.contacts.find_by_user(&contact.user_id).await.unwrap().len(),
            1
        );
    }
}
