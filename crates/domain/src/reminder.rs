use crate::{appointment::Appointment, civil_day::CivilDay, medication::Medication, user::User};
use askama::Template;

pub const DAILY_REMINDER_SUBJECT: &str = "Your Daily Health Reminders";

/// The message a `User` receives from the daily reminder job, in both
/// HTML and plaintext so that any mail client can show it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReminder {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

struct MedicationLine {
    name: String,
    dosage: String,
    timing: String,
}

struct AppointmentLine {
    doctor_name: String,
    time: String,
}

#[derive(Template)]
#[template(path = "daily_reminder.html")]
struct DailyReminderHtml<'a> {
    name: &'a str,
    date: &'a str,
    medications: &'a [MedicationLine],
    appointments: &'a [AppointmentLine],
}

#[derive(Template)]
#[template(path = "daily_reminder.txt")]
struct DailyReminderText<'a> {
    name: &'a str,
    date: &'a str,
    medications: &'a [MedicationLine],
    appointments: &'a [AppointmentLine],
}

/// Composes the daily reminder for `user`.
///
/// `medications` are the ones due on `day` and not yet taken, `appointments`
/// the ones falling on `day`. Returns `None` when there is nothing to remind
/// about, so that nobody gets an empty email.
pub fn compose_reminder(
    user: &User,
    day: &CivilDay,
    medications: &[Medication],
    appointments: &[Appointment],
) -> Result<Option<DailyReminder>, askama::Error> {
    if medications.is_empty() && appointments.is_empty() {
        return Ok(None);
    }

    let medication_lines = medications
        .iter()
        .map(|med| MedicationLine {
            name: med.name.clone(),
            dosage: med.dosage.clone(),
            timing: med.timing.describe(),
        })
        .collect::<Vec<_>>();

    let mut appointments = appointments.iter().collect::<Vec<_>>();
    appointments.sort_by_key(|appt| appt.appointment_datetime);
    let appointment_lines = appointments
        .into_iter()
        .map(|appt| AppointmentLine {
            doctor_name: appt.doctor_name.clone(),
            time: appt.local_time(day),
        })
        .collect::<Vec<_>>();

    let date = day.long_format();
    let html_body = DailyReminderHtml {
        name: user.greeting_name(),
        date: &date,
        medications: &medication_lines,
        appointments: &appointment_lines,
    }
    .render()?;
    let text_body = DailyReminderText {
        name: user.greeting_name(),
        date: &date,
        medications: &medication_lines,
        appointments: &appointment_lines,
    }
    .render()?;

    Ok(Some(DailyReminder {
        subject: DAILY_REMINDER_SUBJECT.to_string(),
        html_body,
        text_body,
    }))
}
