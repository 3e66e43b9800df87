use chrono_tz::Tz;
use health_companion_domain::{DailyTrigger, INDIA_STANDARD_TIME};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address of every outgoing email
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Timezone in which "today" is decided for every `User`
    pub reminder_timezone: Tz,
    /// Wall-clock time in `reminder_timezone` at which the daily reminders
    /// are sent
    pub daily_reminder_time: DailyTrigger,
    /// Missing when no `MAIL_SERVER` is configured, every send will then fail
    pub mail: Option<MailConfig>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = 5000;
        let port = parse_env_or("PORT", default_port);

        let reminder_timezone = match std::env::var("REMINDER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given REMINDER_TIMEZONE: {} is not valid, falling back to: {}.",
                        tz, INDIA_STANDARD_TIME
                    );
                    INDIA_STANDARD_TIME
                }
            },
            Err(_) => INDIA_STANDARD_TIME,
        };

        let daily_reminder_time = parse_env_or("DAILY_REMINDER_TIME", DailyTrigger::default());

        Self {
            port,
            reminder_timezone,
            daily_reminder_time,
            mail: MailConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl MailConfig {
    fn from_env() -> Option<Self> {
        let server = match std::env::var("MAIL_SERVER") {
            Ok(server) if !server.trim().is_empty() => server,
            _ => {
                info!("Did not find MAIL_SERVER environment variable. Reminder emails will not be sent.");
                return None;
            }
        };
        let username = std::env::var("MAIL_USERNAME").ok();
        let from = match std::env::var("MAIL_FROM") {
            Ok(from) => from,
            Err(_) => match &username {
                Some(username) => username.clone(),
                None => {
                    warn!("Neither MAIL_FROM nor MAIL_USERNAME is set. Reminder emails will not be sent.");
                    return None;
                }
            },
        };

        Some(Self {
            server,
            port: parse_env_or("MAIL_PORT", 587),
            username,
            password: std::env::var("MAIL_PASSWORD").ok(),
            from,
        })
    }
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    let value = match std::env::var(key) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                key, value, default
            );
            default
        }
    }
}
