use crate::shared::entity::{Entity, Owned, ID};

#[derive(Debug, Clone)]
pub struct EmergencyContact {
    pub id: ID,
    pub user_id: ID,
    pub contact_name: String,
    pub phone_number: String,
    /// e.g. "Daughter" or "Neighbour"
    pub relationship_type: Option<String>,
}

impl EmergencyContact {
    pub fn new(user_id: ID, contact_name: String, phone_number: String) -> Self {
        Self {
            id: Default::default(),
            user_id,
            contact_name,
            phone_number,
            relationship_type: None,
        }
    }
}

impl Entity for EmergencyContact {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for EmergencyContact {
    fn owner_id(&self) -> &ID {
        &self.user_id
    }
}
