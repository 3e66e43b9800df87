use crate::shared::{panic::catch_panic, usecase::UseCase};
use health_companion_domain::{compose_reminder, CivilDay, Medication, User, ID};
use health_companion_infra::{HealthContext, SendError};
use thiserror::Error;
use tracing::{error, info};

/// Whether the `User` logged the `Medication` as taken at any instant that
/// falls on `day`. Any number of logs on that day count as taken.
pub async fn already_taken_today(
    ctx: &HealthContext,
    user_id: &ID,
    medication_id: &ID,
    day: &CivilDay,
) -> anyhow::Result<bool> {
    ctx.repos
        .medication_logs
        .exists_on_day(user_id, medication_id, day)
        .await
}

/// One run of the daily reminder job: every active `User` with notifications
/// enabled receives one email listing the `Medication`s due today that are
/// not yet taken and today's `Appointment`s.
#[derive(Debug)]
pub struct SendDailyRemindersUseCase {
    /// Defaults to the current civil day in the configured reminder timezone
    pub day: Option<CivilDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderRunSummary {
    /// Eligible `User`s in this run
    pub users: usize,
    pub sent: usize,
    /// `User`s with nothing to be reminded about today
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[derive(Error, Debug)]
pub enum RemindUserError {
    #[error("Unable to load reminder data: {0}")]
    Storage(#[from] anyhow::Error),
    #[error("Unable to compose reminder: {0}")]
    Compose(String),
    #[error("Unable to send reminder: {0}")]
    Send(#[from] SendError),
    #[error("Panicked while reminding: {0}")]
    Panicked(String),
}

enum Reminded {
    Sent,
    NothingDue,
}

async fn due_medications(
    ctx: &HealthContext,
    user: &User,
    day: &CivilDay,
) -> anyhow::Result<Vec<Medication>> {
    let mut due = Vec::new();
    for medication in ctx.repos.medications.find_by_user(&user.id).await? {
        if !medication.is_due_on(day) {
            continue;
        }
        if !already_taken_today(ctx, &user.id, &medication.id, day).await? {
            due.push(medication);
        }
    }
    Ok(due)
}

async fn remind_user(
    ctx: &HealthContext,
    user: &User,
    day: &CivilDay,
) -> Result<Reminded, RemindUserError> {
    let medications = due_medications(ctx, user, day).await?;
    let appointments = ctx
        .repos
        .appointments
        .find_by_user_on_day(&user.id, day)
        .await?;

    let reminder = match compose_reminder(user, day, &medications, &appointments)
        .map_err(|e| RemindUserError::Compose(e.to_string()))?
    {
        Some(reminder) => reminder,
        None => return Ok(Reminded::NothingDue),
    };

    ctx.mailer
        .send_message(
            &user.email,
            &reminder.subject,
            &reminder.html_body,
            &reminder.text_body,
        )
        .await?;
    Ok(Reminded::Sent)
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDailyRemindersUseCase {
    type Response = ReminderRunSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SendDailyReminders";

    async fn execute(&mut self, ctx: &HealthContext) -> Result<Self::Response, Self::Error> {
        let day = match self.day {
            Some(day) => day,
            None => CivilDay::from_instant(&ctx.sys.now(), ctx.config.reminder_timezone),
        };

        let users = ctx
            .repos
            .users
            .find_notifiable()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Sending daily reminders for {} to {} user(s)",
            day.date(),
            users.len()
        );

        let mut summary = ReminderRunSummary {
            users: users.len(),
            ..Default::default()
        };
        for user in &users {
            let res = match catch_panic(remind_user(ctx, user, &day)).await {
                Ok(res) => res,
                Err(message) => Err(RemindUserError::Panicked(message)),
            };
            match res {
                Ok(Reminded::Sent) => summary.sent += 1,
                Ok(Reminded::NothingDue) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        "Daily reminder for user: {} ({}) failed: {}",
                        user.id, user.email, e
                    );
                }
            }
        }

        info!(
            "Daily reminders for {} done. Sent: {}, skipped: {}, failed: {}",
            day.date(),
            summary.sent,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::prelude::*;
    use health_companion_domain::{
        Appointment, DayOfMonth, FrequencyRule, MedicationLog, MedicationTiming,
        INDIA_STANDARD_TIME,
    };
    use health_companion_infra::{IMailer, InMemoryMailer, ISys};
    use std::sync::Arc;

    struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            // Tuesday 2024-01-16T08:00:00+05:30
            Utc.with_ymd_and_hms(2024, 1, 16, 2, 30, 0)
                .unwrap()
                .timestamp_millis()
        }
    }

    struct TestContext {
        ctx: HealthContext,
        mailer: Arc<InMemoryMailer>,
    }

    fn setup() -> TestContext {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = HealthContext::create_inmemory_with_mailer(mailer.clone());
        ctx.sys = Arc::new(StaticTimeSys {});
        TestContext { ctx, mailer }
    }

    fn today() -> CivilDay {
        CivilDay::new(
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            INDIA_STANDARD_TIME,
        )
    }

    async fn insert_user(ctx: &HealthContext, email: &str, name: &str) -> User {
        let mut user = User::new(email.into(), "hash".into());
        user.full_name = Some(name.into());
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    async fn insert_medication(
        ctx: &HealthContext,
        user: &User,
        name: &str,
        frequency: FrequencyRule,
    ) -> Medication {
        let medication = Medication::new(
            user.id.clone(),
            name.into(),
            "500mg".into(),
            MedicationTiming::MealRelated("after breakfast".into()),
            frequency,
        );
        ctx.repos.medications.insert(&medication).await.unwrap();
        medication
    }

    async fn insert_appointment_at_two_pm(ctx: &HealthContext, user: &User) -> Appointment {
        // 14:00 IST
        let appointment = Appointment::new(
            user.id.clone(),
            "Mehta".into(),
            Utc.with_ymd_and_hms(2024, 1, 16, 8, 30, 0).unwrap(),
        );
        ctx.repos.appointments.insert(&appointment).await.unwrap();
        appointment
    }

    async fn log_taken(ctx: &HealthContext, medication: &Medication, at: DateTime<Utc>) {
        ctx.repos
            .medication_logs
            .insert(&MedicationLog::new(
                medication.id.clone(),
                medication.user_id.clone(),
                at,
            ))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn taken_check_uses_ist_dates() {
        let TestContext { ctx, .. } = setup();
        let user = insert_user(&ctx, "asha@example.com", "Asha").await;
        let medication = insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;

        // 2024-01-15T23:59:00+05:30
        log_taken(&ctx, &medication, Utc.with_ymd_and_hms(2024, 1, 15, 18, 29, 0).unwrap()).await;
        assert!(!already_taken_today(&ctx, &user.id, &medication.id, &today())
            .await
            .unwrap());

        // 2024-01-16T00:30:00+05:30
        log_taken(&ctx, &medication, Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap()).await;
        assert!(already_taken_today(&ctx, &user.id, &medication.id, &today())
            .await
            .unwrap());

        // Logging twice on the same day still counts as taken
        log_taken(&ctx, &medication, Utc.with_ymd_and_hms(2024, 1, 16, 4, 0, 0).unwrap()).await;
        assert!(already_taken_today(&ctx, &user.id, &medication.id, &today())
            .await
            .unwrap());
    }

    #[actix_web::test]
    async fn reminds_about_due_medication_and_appointment() {
        let TestContext { ctx, mailer } = setup();
        let user = insert_user(&ctx, "asha@example.com", "Asha Rao").await;
        insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;
        insert_appointment_at_two_pm(&ctx, &user).await;

        let summary = execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();
        assert_eq!(
            summary,
            ReminderRunSummary {
                users: 1,
                sent: 1,
                skipped: 0,
                failed: 0
            }
        );

        let sent = mailer.sent_to("asha@example.com");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Your Daily Health Reminders");
        for body in &[&sent[0].html_body, &sent[0].text_body] {
            assert!(body.contains("Hello Asha Rao,"));
            assert!(body.contains("January 16, 2024"));
            assert!(body.contains("Metformin"));
            assert!(body.contains("Dr. Mehta"));
            assert!(body.contains("02:00 PM"));
        }
    }

    #[actix_web::test]
    async fn leaves_out_medication_taken_today() {
        let TestContext { ctx, mailer } = setup();
        let user = insert_user(&ctx, "asha@example.com", "Asha").await;
        let metformin = insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;
        insert_medication(&ctx, &user, "Aspirin", FrequencyRule::Daily).await;
        insert_appointment_at_two_pm(&ctx, &user).await;
        // 2024-01-16T00:30:00+05:30
        log_taken(&ctx, &metformin, Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap()).await;

        execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();

        let sent = mailer.sent_to("asha@example.com");
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].text_body.contains("Metformin"));
        assert!(sent[0].text_body.contains("Aspirin"));
        assert!(sent[0].text_body.contains("Dr. Mehta"));
    }

    #[actix_web::test]
    async fn nothing_is_sent_when_nothing_is_due() {
        let TestContext { ctx, mailer } = setup();
        let user = insert_user(&ctx, "asha@example.com", "Asha").await;
        let metformin = insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;
        insert_medication(&ctx, &user, "Paracetamol", FrequencyRule::AsNeeded).await;
        insert_medication(
            &ctx,
            &user,
            "Vitamin D",
            FrequencyRule::Monthly(DayOfMonth::new(15).unwrap()),
        )
        .await;
        log_taken(&ctx, &metformin, Utc.with_ymd_and_hms(2024, 1, 16, 1, 0, 0).unwrap()).await;

        let summary = execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.skipped, 1);
        assert!(mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn skips_users_without_notifications() {
        let TestContext { ctx, mailer } = setup();
        let asha = insert_user(&ctx, "asha@example.com", "Asha").await;
        let mut ravi = insert_user(&ctx, "ravi@example.com", "Ravi").await;
        ravi.notifications_enabled = false;
        ctx.repos.users.save(&ravi).await.unwrap();
        insert_medication(&ctx, &asha, "Metformin", FrequencyRule::Daily).await;
        insert_medication(&ctx, &ravi, "Metformin", FrequencyRule::Daily).await;

        let summary = execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.users, 1);
        assert_eq!(mailer.sent().len(), 1);
        assert!(mailer.sent_to("ravi@example.com").is_empty());
    }

    #[actix_web::test]
    async fn failing_transport_for_one_user_does_not_stop_the_run() {
        let TestContext { ctx, mailer } = setup();
        let mut users = Vec::new();
        for (email, name) in &[
            ("asha@example.com", "Asha"),
            ("broken@example.com", "Broken"),
            ("ravi@example.com", "Ravi"),
        ] {
            let user = insert_user(&ctx, email, name).await;
            insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;
            users.push(user);
        }
        mailer.fail_for("broken@example.com");

        let summary = execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();
        assert_eq!(
            summary,
            ReminderRunSummary {
                users: 3,
                sent: 2,
                skipped: 0,
                failed: 1
            }
        );
        assert_eq!(mailer.sent_to("asha@example.com").len(), 1);
        assert_eq!(mailer.sent_to("ravi@example.com").len(), 1);
        assert!(mailer.sent_to("broken@example.com").is_empty());
    }

    #[actix_web::test]
    async fn uses_the_given_day() {
        let TestContext { ctx, mailer } = setup();
        let user = insert_user(&ctx, "asha@example.com", "Asha").await;
        insert_medication(
            &ctx,
            &user,
            "Vitamin D",
            FrequencyRule::Monthly(DayOfMonth::new(15).unwrap()),
        )
        .await;

        let day = CivilDay::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            INDIA_STANDARD_TIME,
        );
        let summary = execute(SendDailyRemindersUseCase { day: Some(day) }, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.sent, 1);
        assert!(mailer.sent()[0].text_body.contains("January 15, 2024"));
    }

    struct PanickingMailer {
        inner: InMemoryMailer,
        panic_for: &'static str,
    }

    #[async_trait::async_trait]
    impl IMailer for PanickingMailer {
        async fn send_message(
            &self,
            to: &str,
            subject: &str,
            html_body: &str,
            text_body: &str,
        ) -> Result<(), SendError> {
            if to == self.panic_for {
                panic!("transport crashed for {}", to);
            }
            self.inner
                .send_message(to, subject, html_body, text_body)
                .await
        }
    }

    #[actix_web::test]
    async fn panic_for_one_user_does_not_stop_the_run() {
        let mailer = Arc::new(PanickingMailer {
            inner: InMemoryMailer::new(),
            panic_for: "broken@example.com",
        });
        let mut ctx = HealthContext::create_inmemory_with_mailer(mailer.clone());
        ctx.sys = Arc::new(StaticTimeSys {});
        for (email, name) in &[("broken@example.com", "Broken"), ("ravi@example.com", "Ravi")] {
            let user = insert_user(&ctx, email, name).await;
            insert_medication(&ctx, &user, "Metformin", FrequencyRule::Daily).await;
        }

        let summary = execute(SendDailyRemindersUseCase { day: None }, &ctx)
            .await
            .unwrap();
        assert_eq!(
            summary,
            ReminderRunSummary {
                users: 2,
                sent: 1,
                skipped: 0,
                failed: 1
            }
        );
        assert_eq!(mailer.inner.sent_to("ravi@example.com").len(), 1);
        assert!(mailer.inner.sent_to("broken@example.com").is_empty());
    }
}
