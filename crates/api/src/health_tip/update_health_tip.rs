use crate::shared::usecase::UseCase;
use health_companion_domain::{HealthTip, InvalidHealthTip, ID};
use health_companion_infra::HealthContext;

/// Health tips are shared by every `User`, so any signed in `User` may
/// edit one
#[derive(Debug, Default)]
pub struct UpdateHealthTipUseCase {
    pub tip_id: ID,
    pub tip_text: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub tip: HealthTip,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    InvalidTip(InvalidHealthTip),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateHealthTipUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateHealthTip";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let existing = match ctx.repos.health_tips.find(&self.tip_id).await {
            Some(tip) => tip,
            None => return Err(UseCaseError::NotFound(self.tip_id.clone())),
        };

        let tip_text = self.tip_text.clone().unwrap_or(existing.tip_text);
        let category = self.category.clone().or(Some(existing.category));
        let mut tip = HealthTip::new(tip_text, category).map_err(UseCaseError::InvalidTip)?;
        tip.id = existing.id;

        ctx.repos
            .health_tips
            .save(&tip)
            .await
            .map(|_| UseCaseRes { tip })
            .map_err(|_| UseCaseError::StorageError)
    }
}
