use crate::shared::usecase::UseCase;
use health_companion_domain::{HealthTip, InvalidHealthTip};
use health_companion_infra::HealthContext;

#[derive(Debug)]
pub struct CreateHealthTipUseCase {
    pub tip_text: String,
    pub category: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub tip: HealthTip,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    InvalidTip(InvalidHealthTip),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateHealthTipUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateHealthTip";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let tip = HealthTip::new(self.tip_text.clone(), self.category.clone())
            .map_err(UseCaseError::InvalidTip)?;

        ctx.repos
            .health_tips
            .insert(&tip)
            .await
            .map(|_| UseCaseRes { tip })
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::test]
    async fn creates_tip_with_default_category() {
        let ctx = HealthContext::create_inmemory();
        let mut usecase = CreateHealthTipUseCase {
            tip_text: "Take a short walk after every meal.".into(),
            category: None,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.tip.category, "General");
        assert!(ctx.repos.health_tips.find(&res.tip.id).await.is_some());

        usecase.tip_text = "Walk.".into();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidTip(InvalidHealthTip::TooShort(10))
        );
    }
}
