use crate::shared::usecase::UseCase;
use health_companion_domain::{User, ID};
use health_companion_infra::HealthContext;

/// Deletes a `User` together with everything the `User` owns
#[derive(Debug)]
pub struct DeleteUserUseCase {
    pub user_id: ID,
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
impl UseCase for DeleteUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.user_id.clone()));
        }

        let repos = &ctx.repos;
        repos
            .medication_logs
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        repos
            .medications
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        repos
            .appointments
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        repos
            .contacts
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match repos.users.delete(&self.user_id).await {
            Some(user) => Ok(UseCaseRes { user }),
            None => Err(UseCaseError::NotFound(self.user_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;
    use health_companion_domain::{
        Appointment, EmergencyContact, FrequencyRule, Medication, MedicationLog, MedicationTiming,
    };

    #[actix_web::test]
    async fn deletes_everything_the_user_owns() {
        let ctx = HealthContext::create_inmemory();
        let user = User::new("asha@example.com".into(), "hash".into());
        let other = User::new("ravi@example.com".into(), "hash".into());
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos.users.insert(&other).await.unwrap();

        let now = Utc.with_ymd_and_hms(2024, 1, 16, 3, 0, 0).unwrap();
        for owner in &[&user, &other] {
            let medication = Medication::new(
                owner.id.clone(),
                "Metformin".into(),
                "500mg".into(),
                MedicationTiming::Anytime,
                FrequencyRule::Daily,
            );
            ctx.repos.medications.insert(&medication).await.unwrap();
            ctx.repos
                .medication_logs
                .insert(&MedicationLog::new(
                    medication.id.clone(),
                    owner.id.clone(),
                    now,
                ))
                .await
                .unwrap();
            ctx.repos
                .appointments
                .insert(&Appointment::new(owner.id.clone(), "Mehta".into(), now))
                .await
                .unwrap();
            ctx.repos
                .contacts
                .insert(&EmergencyContact::new(
                    owner.id.clone(),
                    "Priya".into(),
                    "+91 98765 43210".into(),
                ))
                .await
                .unwrap();
        }

        let mut usecase = DeleteUserUseCase {
            user_id: user.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        assert!(ctx.repos.users.find(&user.id).await.is_none());
        assert!(ctx.repos.medications.find_by_user(&user.id).await.unwrap().is_empty());
        assert!(ctx.repos.appointments.find_by_user(&user.id).await.unwrap().is_empty());
        assert!(ctx.repos.contacts.find_by_user(&user.id).await.unwrap().is_empty());
        assert_eq!(ctx.repos.medication_logs.delete_by_user(&user.id).await.unwrap(), 0);

        assert_eq!(ctx.repos.medications.find_by_user(&other.id).await.unwrap().len(), 1);
        assert_eq!(ctx.repos.appointments.find_by_user(&other.id).await.unwrap().len(), 1);
        assert_eq!(ctx.repos.contacts.find_by_user(&other.id).await.unwrap().len(), 1);

        let mut usecase = DeleteUserUseCase { user_id: user.id.clone() };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(user.id.clone())
        );
    }
}
