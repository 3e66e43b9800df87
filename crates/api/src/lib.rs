pub mod appointment;
pub mod contact;
pub mod dashboard;
pub mod health_tip;
pub mod job_schedulers;
pub mod medication;
pub mod reminder;
pub mod shared;
mod status;
pub mod user;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
use health_companion_infra::HealthContext;
use job_schedulers::{start_daily_reminders_job, JobScheduler};
use std::net::TcpListener;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    scheduler: JobScheduler,
}

impl Application {
    pub async fn new(context: HealthContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.config.port).await?;
        let scheduler = Application::start_job_schedulers(context);

        Ok(Self {
            server,
            port,
            scheduler,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    /// A failing job registration is logged and the server keeps running
    /// without reminders
    fn start_job_schedulers(context: HealthContext) -> JobScheduler {
        let mut scheduler = JobScheduler::new(context);
        scheduler.start();
        if let Err(e) = start_daily_reminders_job(&mut scheduler) {
            error!(
                "Unable to schedule the daily reminders, continuing without them: {}",
                e
            );
        }
        scheduler
    }

    async fn configure_server(port: usize) -> Result<(Server, u16), std::io::Error> {
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(|| {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let Self {
            server,
            mut scheduler,
            ..
        } = self;
        let res = server.await;
        info!("Server stopped, stopping the job scheduler");
        scheduler.stop();
        res
    }
}
