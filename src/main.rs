mod telemetry;

use health_companion_api::Application;
use health_companion_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("health_companion".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
