use crate::shared::usecase::UseCase;
use health_companion_domain::{EmergencyContact, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct DeleteContactUseCase {
    pub user_id: ID,
    pub contact_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub contact: EmergencyContact,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteContactUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteContact";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.contacts.find(&self.contact_id).await {
            Some(contact) if contact.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.contact_id.clone())),
        };

        match ctx.repos.contacts.delete(&self.contact_id).await {
            Some(contact) => Ok(UseCaseRes { contact }),
            None => Err(UseCaseError::NotFound(self.contact_id.clone())),
        }
    }
}
