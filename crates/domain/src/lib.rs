mod appointment;
mod civil_day;
mod contact;
mod health_tip;
mod medication;
mod medication_log;
mod reminder;
mod shared;
mod user;

pub use appointment::Appointment;
pub use civil_day::{CivilDay, DailyTrigger, InvalidDailyTrigger, INDIA_STANDARD_TIME};
pub use contact::EmergencyContact;
pub use health_tip::{HealthTip, InvalidHealthTip};
pub use medication::{
    is_due_today, parse_weekday_name, weekday_name, DayOfMonth, FrequencyRule,
    InvalidFrequencyRule, InvalidMedicationTiming, Medication, MedicationTiming, WeekdaySet,
};
pub use medication_log::MedicationLog;
pub use reminder::{compose_reminder, DailyReminder, DAILY_REMINDER_SUBJECT};
pub use shared::entity::{Entity, InvalidIDError, Owned, ID};
pub use user::User;
