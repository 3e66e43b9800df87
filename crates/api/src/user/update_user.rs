use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use health_companion_domain::{User, ID};
use health_companion_infra::HealthContext;

/// Updates the profile of a `User`, fields that are `None` are left untouched
#[derive(Debug, Default)]
pub struct UpdateUserUseCase {
    pub user_id: ID,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub notifications_enabled: Option<bool>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::NotFound(self.user_id.clone())),
        };

        if let Some(full_name) = &self.full_name {
            user.full_name = Some(full_name.clone());
        }
        if let Some(date_of_birth) = self.date_of_birth {
            user.date_of_birth = Some(date_of_birth);
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(enabled) = self.notifications_enabled {
            user.notifications_enabled = enabled;
        }

        ctx.repos
            .users
            .save(&user)
            .await
            .map(|_| UseCaseRes { user })
            .map_err(|_| UseCaseError::StorageError)
    }
}
