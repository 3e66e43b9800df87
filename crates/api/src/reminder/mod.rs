pub mod send_daily_reminders;
