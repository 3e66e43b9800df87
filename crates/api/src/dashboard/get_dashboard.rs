use crate::shared::usecase::UseCase;
use health_companion_domain::{Appointment, CivilDay, EmergencyContact, Medication, ID};
use health_companion_infra::HealthContext;

pub const FALLBACK_HEALTH_TIP: &str = "Remember to stay active!";

/// Everything the `User` sees on the landing page, "today" being the civil
/// date in the configured reminder timezone
#[derive(Debug)]
pub struct GetDashboardUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct Dashboard {
    pub user_full_name: Option<String>,
    pub greeting: String,
    pub today: CivilDay,
    pub medications_today: Vec<Medication>,
    /// Ids of the `medications_today` already taken today
    pub taken_today_ids: Vec<ID>,
    pub appointments_today: Vec<Appointment>,
    /// Today's and later `Appointment`s, ordered by time
    pub upcoming_appointments: Vec<Appointment>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub health_tip: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDashboardUseCase {
    type Response = Dashboard;
    type Error = UseCaseError;

    const NAME: &'static str = "GetDashboard";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::NotFound(self.user_id.clone())),
        };
        let today = CivilDay::from_instant(&ctx.sys.now(), ctx.config.reminder_timezone);

        let medications_today = ctx
            .repos
            .medications
            .find_by_user(&user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .filter(|medication| medication.is_due_on(&today))
            .collect::<Vec<_>>();

        let mut taken_today_ids = Vec::new();
        for medication in &medications_today {
            let taken = ctx
                .repos
                .medication_logs
                .exists_on_day(&user.id, &medication.id, &today)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if taken {
                taken_today_ids.push(medication.id.clone());
            }
        }

        let upcoming_appointments = ctx
            .repos
            .appointments
            .find_by_user(&user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .filter(|appointment| appointment.appointment_datetime >= today.start())
            .collect::<Vec<_>>();
        let appointments_today = upcoming_appointments
            .iter()
            .filter(|appointment| appointment.is_on(&today))
            .cloned()
            .collect::<Vec<_>>();

        let emergency_contacts = ctx
            .repos
            .contacts
            .find_by_user(&user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let health_tip = match ctx.repos.health_tips.find_random().await {
            Some(tip) => tip.tip_text,
            None => FALLBACK_HEALTH_TIP.to_string(),
        };

        Ok(Dashboard {
            greeting: format!(
                "Namaste, {}! You have {} appointment(s) today.",
                user.first_name(),
                appointments_today.len()
            ),
            user_full_name: user.full_name,
            today,
            medications_today,
            taken_today_ids,
            appointments_today,
            upcoming_appointments,
            emergency_contacts,
            health_tip,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;
    use health_companion_domain::{
        FrequencyRule, HealthTip, MedicationLog, MedicationTiming, User, WeekdaySet,
    };
    use health_companion_infra::ISys;
    use std::sync::Arc;

    struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            // Tuesday 2024-01-16T09:00:00+05:30
            Utc.with_ymd_and_hms(2024, 1, 16, 3, 30, 0)
                .unwrap()
                .timestamp_millis()
        }
    }

    async fn setup() -> (HealthContext, User) {
        let mut ctx = HealthContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let mut user = User::new("asha@example.com".into(), "hash".into());
        user.full_name = Some("Asha Rao".into());
        ctx.repos.users.insert(&user).await.unwrap();
        (ctx, user)
    }

    fn medication(user: &User, name: &str, frequency: FrequencyRule) -> Medication {
        Medication::new(
            user.id.clone(),
            name.into(),
            "1 tablet".into(),
            MedicationTiming::Anytime,
            frequency,
        )
    }

    #[actix_web::test]
    async fn shows_todays_plan() {
        let (ctx, user) = setup().await;

        let daily = medication(&user, "Metformin", FrequencyRule::Daily);
        let tuesdays = medication(
            &user,
            "Vitamin B12",
            FrequencyRule::Weekly(WeekdaySet::new(vec![Weekday::Tue]).unwrap()),
        );
        let mondays = medication(
            &user,
            "Vitamin D",
            FrequencyRule::Weekly(WeekdaySet::new(vec![Weekday::Mon]).unwrap()),
        );
        let as_needed = medication(&user, "Paracetamol", FrequencyRule::AsNeeded);
        for m in &[&daily, &tuesdays, &mondays, &as_needed] {
            ctx.repos.medications.insert(m).await.unwrap();
        }
        // 2024-01-16 00:30 IST
        ctx.repos
            .medication_logs
            .insert(&MedicationLog::new(
                daily.id.clone(),
                user.id.clone(),
                Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap(),
            ))
            .await
            .unwrap();

        let yesterday = Appointment::new(
            user.id.clone(),
            "Old".into(),
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        );
        let today = Appointment::new(
            user.id.clone(),
            "Mehta".into(),
            Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap(),
        );
        let next_week = Appointment::new(
            user.id.clone(),
            "Iyer".into(),
            Utc.with_ymd_and_hms(2024, 1, 23, 5, 0, 0).unwrap(),
        );
        for a in &[&next_week, &yesterday, &today] {
            ctx.repos.appointments.insert(a).await.unwrap();
        }

        let mut usecase = GetDashboardUseCase {
            user_id: user.id.clone(),
        };
        let dashboard = usecase.execute(&ctx).await.unwrap();

        assert_eq!(dashboard.greeting, "Namaste, Asha! You have 1 appointment(s) today.");
        assert_eq!(dashboard.user_full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(
            dashboard
                .medications_today
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Metformin", "Vitamin B12"]
        );
        assert_eq!(dashboard.taken_today_ids, vec![daily.id.clone()]);
        assert_eq!(dashboard.appointments_today.len(), 1);
        assert_eq!(dashboard.appointments_today[0].id, today.id);
        assert_eq!(
            dashboard
                .upcoming_appointments
                .iter()
                .map(|a| a.id.clone())
                .collect::<Vec<_>>(),
            vec![today.id.clone(), next_week.id.clone()]
        );
        assert_eq!(dashboard.health_tip, FALLBACK_HEALTH_TIP);
    }

    #[actix_web::test]
    async fn shows_a_stored_tip() {
        let (ctx, user) = setup().await;
        let tip = HealthTip::new("Stretch for five minutes every morning.".into(), None).unwrap();
        ctx.repos.health_tips.insert(&tip).await.unwrap();

        let mut usecase = GetDashboardUseCase {
            user_id: user.id.clone(),
        };
        let dashboard = usecase.execute(&ctx).await.unwrap();
        assert_eq!(dashboard.health_tip, tip.tip_text);
        assert_eq!(dashboard.greeting, "Namaste, Asha! You have 0 appointment(s) today.");
    }
}
