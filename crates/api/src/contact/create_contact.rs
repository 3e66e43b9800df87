use super::is_valid_phone_number;
use crate::shared::usecase::UseCase;
use health_companion_domain::{EmergencyContact, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct CreateContactUseCase {
    pub user_id: ID,
    pub contact_name: String,
    pub phone_number: String,
    pub relationship_type: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub contact: EmergencyContact,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
    InvalidContactName,
    InvalidPhoneNumber(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateContactUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateContact";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let contact_name = self.contact_name.trim();
        if contact_name.is_empty() {
            return Err(UseCaseError::InvalidContactName);
        }
        let phone_number = self.phone_number.trim();
        if !is_valid_phone_number(phone_number) {
            return Err(UseCaseError::InvalidPhoneNumber(phone_number.to_string()));
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let mut contact = EmergencyContact::new(
            self.user_id.clone(),
            contact_name.to_string(),
            phone_number.to_string(),
        );
        contact.relationship_type = self.relationship_type.clone();

        ctx.repos
            .contacts
            .insert(&contact)
            .await
            .map(|_| UseCaseRes { contact })
            .map_err(|_| UseCaseError::StorageError)
    }
}
