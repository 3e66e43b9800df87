use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    /// Produced by the authentication layer, never a plaintext password
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    /// Whether the `User` wants the daily reminder email
    pub notifications_enabled: bool,
    pub is_active: bool,
}

impl User {
    pub fn new(email: String, hashed_password: String) -> Self {
        Self {
            id: Default::default(),
            email,
            hashed_password,
            full_name: None,
            date_of_birth: None,
            address: None,
            notifications_enabled: true,
            is_active: true,
        }
    }

    /// Whether the daily reminder batch should consider this `User`
    pub fn wants_reminders(&self) -> bool {
        self.is_active && self.notifications_enabled
    }

    /// Name used to greet the `User`, "there" when no name is known
    pub fn greeting_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "there",
        }
    }

    pub fn first_name(&self) -> &str {
        self.greeting_name()
            .split_whitespace()
            .next()
            .unwrap_or("there")
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
