use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use health_companion_domain::User;
use health_companion_infra::HealthContext;

/// Registers a new `User`. The password arrives already hashed.
#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    InvalidEmail(String),
    UserAlreadyExists(String),
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(UseCaseError::InvalidEmail(email));
        }
        if ctx.repos.users.find_by_email(&email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists(email));
        }

        let mut user = User::new(email, self.hashed_password.clone());
        user.full_name = self.full_name.clone();
        user.date_of_birth = self.date_of_birth;
        user.address = self.address.clone();

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| UseCaseRes { user })
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn usecase(email: &str) -> CreateUserUseCase {
        CreateUserUseCase {
            email: email.into(),
            hashed_password: "$2b$12$hash".into(),
            full_name: Some("Asha Rao".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1950, 3, 14),
            address: None,
        }
    }

    #[actix_web::test]
    async fn creates_user_with_notifications_enabled() {
        let ctx = HealthContext::create_inmemory();

        let res = usecase("asha@example.com").execute(&ctx).await.unwrap();
        assert!(res.user.notifications_enabled);
        assert!(res.user.is_active);
        assert_eq!(res.user.first_name(), "Asha");

        let stored = ctx.repos.users.find(&res.user.id).await.unwrap();
        assert_eq!(stored.email, "asha@example.com");
    }

    #[actix_web::test]
    async fn rejects_duplicate_emails() {
        let ctx = HealthContext::create_inmemory();
        assert!(usecase("asha@example.com").execute(&ctx).await.is_ok());

        let res = usecase(" asha@example.com ").execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::UserAlreadyExists("asha@example.com".into())
        );
    }

    #[actix_web::test]
    async fn rejects_malformed_emails() {
        let ctx = HealthContext::create_inmemory();
        for email in &["", "asha", "@example.com", "asha@localhost"] {
            let res = usecase(email).execute(&ctx).await;
            assert_eq!(res.unwrap_err(), UseCaseError::InvalidEmail(email.to_string()));
        }
    }
}
