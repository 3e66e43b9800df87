use crate::shared::usecase::UseCase;
use health_companion_domain::{HealthTip, ID};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct DeleteHealthTipUseCase {
    pub tip_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub tip: HealthTip,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteHealthTipUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteHealthTip";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.health_tips.delete(&self.tip_id).await {
            Some(tip) => Ok(UseCaseRes { tip }),
            None => Err(UseCaseError::NotFound(self.tip_id.clone())),
        }
    }
}
