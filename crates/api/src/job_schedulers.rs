use crate::{
    reminder::send_daily_reminders::SendDailyRemindersUseCase,
    shared::{panic::catch_panic, usecase::execute},
};
use actix_web::rt::{task::JoinHandle, time::sleep};
use futures::future::{FutureExt, LocalBoxFuture};
use chrono::NaiveDate;
use health_companion_domain::{CivilDay, DailyTrigger};
use health_companion_infra::HealthContext;
use std::{collections::HashMap, rc::Rc, time::Duration};
use thiserror::Error;
use tracing::{error, info};

pub const DAILY_REMINDERS_JOB_ID: &str = "daily_medication_reminders";

pub type Job = Rc<dyn Fn(HealthContext) -> LocalBoxFuture<'static, ()>>;

#[derive(Error, Debug, PartialEq)]
pub enum SchedulerError {
    #[error("The job scheduler is not running")]
    NotRunning,
    #[error("No job is registered with id: {0}")]
    UnknownJob(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

struct ScheduledJob {
    job: Job,
    trigger: DailyTrigger,
    handle: JoinHandle<()>,
}

/// Runs jobs once per civil day at a wall-clock time in the configured
/// reminder timezone.
///
/// Jobs are registered by id, registering a job under an id that is already
/// taken replaces the previous job.
pub struct JobScheduler {
    ctx: HealthContext,
    state: SchedulerState,
    jobs: HashMap<String, ScheduledJob>,
}

impl JobScheduler {
    pub fn new(ctx: HealthContext) -> Self {
        Self {
            ctx,
            state: SchedulerState::Stopped,
            jobs: HashMap::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
    }

    /// Must be called from within the actix runtime
    pub fn schedule_daily(
        &mut self,
        job_id: &str,
        trigger: DailyTrigger,
        job: Job,
    ) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::NotRunning);
        }
        if let Some(previous) = self.jobs.remove(job_id) {
            info!("Replacing job: {}", job_id);
            previous.handle.abort();
        }

        let handle = actix_web::rt::spawn(run_daily(
            job_id.to_string(),
            trigger,
            job.clone(),
            self.ctx.clone(),
        ));
        self.jobs.insert(
            job_id.to_string(),
            ScheduledJob {
                job,
                trigger,
                handle,
            },
        );
        info!("Scheduled job: {} daily at {}", job_id, trigger);
        Ok(())
    }

    /// Runs the job right away, independent of its schedule
    pub async fn trigger(&self, job_id: &str) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::NotRunning);
        }
        let job = match self.jobs.get(job_id) {
            Some(scheduled) => scheduled.job.clone(),
            None => return Err(SchedulerError::UnknownJob(job_id.to_string())),
        };
        run_job(job_id, &job, &self.ctx).await;
        Ok(())
    }

    /// Ids of the registered jobs and their triggers
    pub fn jobs(&self) -> Vec<(String, DailyTrigger)> {
        let mut jobs = self
            .jobs
            .iter()
            .map(|(id, scheduled)| (id.clone(), scheduled.trigger))
            .collect::<Vec<_>>();
        jobs.sort_by(|a, b| a.0.cmp(&b.0));
        jobs
    }

    /// Aborts every job. A run in progress is cancelled as well.
    pub fn stop(&mut self) {
        for (_, scheduled) in self.jobs.drain() {
            scheduled.handle.abort();
        }
        self.state = SchedulerState::Stopped;
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A panicking job is logged so that the daily loop survives it
async fn run_job(job_id: &str, job: &Job, ctx: &HealthContext) {
    if let Err(message) = catch_panic(job(ctx.clone())).await {
        error!("Job: {} panicked: {}", job_id, message);
    }
}

/// Remembers the civil date of the last scheduled run, a job runs at most
/// once per date
#[derive(Debug, Default)]
struct DailyRunGuard {
    last_run: Option<NaiveDate>,
}

impl DailyRunGuard {
    /// Whether a run on `date` may go ahead, claiming the date if so
    fn claim(&mut self, date: NaiveDate) -> bool {
        if self.last_run == Some(date) {
            return false;
        }
        self.last_run = Some(date);
        true
    }
}

async fn run_daily(job_id: String, trigger: DailyTrigger, job: Job, ctx: HealthContext) {
    let timezone = ctx.config.reminder_timezone;
    let mut guard = DailyRunGuard::default();
    loop {
        let now = ctx.sys.get_timestamp_millis();
        let delay = trigger.millis_until_next(now, &timezone);
        sleep(Duration::from_millis(delay)).await;

        // The timer and the wall clock can disagree by a little, waking up
        // just before the trigger time must not produce a second run.
        let today = CivilDay::from_instant(&ctx.sys.now(), timezone);
        if !guard.claim(today.date()) {
            continue;
        }

        info!("Running job: {}", job_id);
        run_job(&job_id, &job, &ctx).await;
    }
}

fn send_daily_reminders_job() -> Job {
    Rc::new(|ctx: HealthContext| {
        async move {
            if let Err(e) = execute(SendDailyRemindersUseCase { day: None }, &ctx).await {
                error!("Daily reminder run failed: {:?}", e);
            }
        }
        .boxed_local()
    })
}

/// Registers the daily reminder batch at the configured wall-clock time
pub fn start_daily_reminders_job(scheduler: &mut JobScheduler) -> Result<(), SchedulerError> {
    let trigger = scheduler.ctx.config.daily_reminder_time;
    scheduler.schedule_daily(DAILY_REMINDERS_JOB_ID, trigger, send_daily_reminders_job())
}
