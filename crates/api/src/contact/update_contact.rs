use super::is_valid_phone_number;
use crate::shared::usecase::UseCase;
use health_companion_domain::{EmergencyContact, ID};
use health_companion_infra::HealthContext;

#[derive(Debug, Default)]
pub struct UpdateContactUseCase {
    pub user_id: ID,
    pub contact_id: ID,
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub relationship_type: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub contact: EmergencyContact,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    InvalidContactName,
    InvalidPhoneNumber(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateContactUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateContact";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let mut contact = match ctx.repos.contacts.find(&self.contact_id).await {
            Some(contact) if contact.user_id == self.user_id => contact,
            _ => return Err(UseCaseError::NotFound(self.contact_id.clone())),
        };

        if let Some(contact_name) = &self.contact_name {
            let contact_name = contact_name.trim();
            if contact_name.is_empty() {
                return Err(UseCaseError::InvalidContactName);
            }
            contact.contact_name = contact_name.to_string();
        }
        if let Some(phone_number) = &self.phone_number {
            let phone_number = phone_number.trim();
            if !is_valid_phone_number(phone_number) {
                return Err(UseCaseError::InvalidPhoneNumber(phone_number.to_string()));
            }
            contact.phone_number = phone_number.to_string();
        }
        if let Some(relationship_type) = &self.relationship_type {
            contact.relationship_type = Some(relationship_type.clone());
        }

        ctx.repos
            .contacts
            .save(&contact)
            .await
            .map(|_| UseCaseRes { contact })
            .map_err(|_| UseCaseError::StorageError)
    }
}
