use chrono::{prelude::*, Duration};
use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

/// India Standard Time. Every "today" in the application is a civil date
/// in this timezone unless configured otherwise.
pub const INDIA_STANDARD_TIME: Tz = chrono_tz::Asia::Kolkata;

/// A calendar date interpreted in a specific timezone.
///
/// Instants are always `DateTime<Utc>`. This is the single place where
/// they are converted into civil dates, so "is this today" questions
/// never compare UTC dates by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDay {
    date: NaiveDate,
    timezone: Tz,
}

impl CivilDay {
    pub fn new(date: NaiveDate, timezone: Tz) -> Self {
        Self { date, timezone }
    }

    /// The civil day the given instant falls on in `timezone`
    pub fn from_instant(instant: &DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            date: instant.with_timezone(&timezone).date_naive(),
            timezone,
        }
    }

    pub fn from_timestamp_millis(millis: i64, timezone: Tz) -> Option<Self> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(|instant| Self::from_instant(&instant, timezone))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Full English weekday name, e.g. "Monday"
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// First instant of this civil day
    pub fn start(&self) -> DateTime<Utc> {
        start_of_day(self.date, &self.timezone)
    }

    /// First instant of the following civil day (exclusive upper bound)
    pub fn end(&self) -> DateTime<Utc> {
        match self.date.succ_opt() {
            Some(next) => start_of_day(next, &self.timezone),
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        instant.with_timezone(&self.timezone).date_naive() == self.date
    }

    pub fn to_local(&self, instant: &DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    /// e.g. "January 16, 2024"
    pub fn long_format(&self) -> String {
        self.date.format("%B %d, %Y").to_string()
    }
}

fn start_of_day(date: NaiveDate, timezone: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Midnight can be skipped by a DST transition, the day then starts
    // at the first local time that exists.
    (0..=12)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|local| timezone.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDailyTrigger {
    #[error("`{0}` is not a valid HH:MM wall-clock time")]
    Malformed(String),
}

/// A wall-clock time at which a job fires once per civil day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    hour: u32,
    minute: u32,
}

impl DailyTrigger {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidDailyTrigger> {
        if hour > 23 || minute > 59 {
            return Err(InvalidDailyTrigger::Malformed(format!(
                "{:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The next instant strictly after `now` at which the wall clock in
    /// `timezone` shows this trigger's time.
    pub fn next_after(&self, now: &DateTime<Utc>, timezone: &Tz) -> DateTime<Utc> {
        let mut date = now.with_timezone(timezone).date_naive();
        for _ in 0..3 {
            let fire_at = date
                .and_hms_opt(self.hour, self.minute, 0)
                .and_then(|local| timezone.from_local_datetime(&local).earliest())
                .map(|local| local.with_timezone(&Utc));
            if let Some(fire_at) = fire_at {
                if fire_at > *now {
                    return fire_at;
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        *now + Duration::days(1)
    }

    pub fn millis_until_next(&self, now_millis: i64, timezone: &Tz) -> u64 {
        let now = match Utc.timestamp_millis_opt(now_millis).single() {
            Some(now) => now,
            None => return 0,
        };
        let millis = (self.next_after(&now, timezone) - now).num_milliseconds();
        if millis > 0 {
            millis as u64
        } else {
            0
        }
    }
}

impl Default for DailyTrigger {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl FromStr for DailyTrigger {
    type Err = InvalidDailyTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidDailyTrigger::Malformed(s.to_string());
        let mut parts = s.trim().splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|h| h.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let minute = parts
            .next()
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        Self::new(hour, minute).map_err(|_| malformed())
    }
}

impl std::fmt::Display for DailyTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn converts_utc_instant_to_ist_date() {
        // 2024-01-16T00:30:00+05:30
        let taken_at = utc(2024, 1, 15, 19, 0, 0);
        let day = CivilDay::from_instant(&taken_at, INDIA_STANDARD_TIME);
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(day.weekday(), Weekday::Tue);
        assert_eq!(day.weekday_name(), "Tuesday");
        assert_eq!(day.day_of_month(), 16);
    }

    #[test]
    fn day_bounds_are_local_midnights() {
        let day = CivilDay::new(
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            INDIA_STANDARD_TIME,
        );
        assert_eq!(day.start(), utc(2024, 1, 15, 18, 30, 0));
        assert_eq!(day.end(), utc(2024, 1, 16, 18, 30, 0));

        assert!(day.contains(&utc(2024, 1, 15, 19, 0, 0)));
        assert!(day.contains(&utc(2024, 1, 15, 18, 30, 0)));
        assert!(!day.contains(&utc(2024, 1, 15, 18, 29, 59)));
        assert!(!day.contains(&utc(2024, 1, 16, 18, 30, 0)));
    }

    #[test]
    fn formats_long_date() {
        let day = CivilDay::new(
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            INDIA_STANDARD_TIME,
        );
        assert_eq!(day.long_format(), "January 16, 2024");
    }

    #[test]
    fn parses_daily_triggers() {
        assert_eq!("08:00".parse::<DailyTrigger>(), Ok(DailyTrigger::default()));
        assert_eq!(
            "21:45".parse::<DailyTrigger>(),
            DailyTrigger::new(21, 45)
        );
        assert!("24:00".parse::<DailyTrigger>().is_err());
        assert!("08:60".parse::<DailyTrigger>().is_err());
        assert!("08".parse::<DailyTrigger>().is_err());
        assert!("eight".parse::<DailyTrigger>().is_err());
        assert_eq!(DailyTrigger::default().to_string(), "08:00");
    }

    #[test]
    fn next_fire_time_is_eight_ist() {
        let trigger = DailyTrigger::default();
        let tz = INDIA_STANDARD_TIME;

        // 07:59:59 IST
        let now = utc(2024, 1, 16, 2, 29, 59);
        assert_eq!(trigger.next_after(&now, &tz), utc(2024, 1, 16, 2, 30, 0));

        // Exactly 08:00 IST fires again tomorrow
        let now = utc(2024, 1, 16, 2, 30, 0);
        assert_eq!(trigger.next_after(&now, &tz), utc(2024, 1, 17, 2, 30, 0));

        // 23:00 UTC is already the next civil day in IST
        let now = utc(2024, 1, 16, 23, 0, 0);
        assert_eq!(trigger.next_after(&now, &tz), utc(2024, 1, 17, 2, 30, 0));
    }

    #[test]
    fn millis_until_next_run() {
        let trigger = DailyTrigger::default();
        let now = utc(2024, 1, 16, 2, 29, 0).timestamp_millis();
        assert_eq!(
            trigger.millis_until_next(now, &INDIA_STANDARD_TIME),
            60 * 1000
        );
        let now = utc(2024, 1, 16, 2, 30, 0).timestamp_millis();
        assert_eq!(
            trigger.millis_until_next(now, &INDIA_STANDARD_TIME),
            24 * 60 * 60 * 1000
        );
    }
}
