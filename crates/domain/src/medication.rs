use crate::{
    civil_day::CivilDay,
    shared::entity::{Entity, Owned, ID},
};
use chrono::prelude::*;
use serde_json::Value;
use thiserror::Error;

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

/// Parses a full English weekday name. Matching is exact: "Monday" is a
/// weekday, "monday" and "Mon" are not.
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(_, weekday_name)| *weekday_name == name)
        .map(|(weekday, _)| *weekday)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS
        .iter()
        .find(|(wd, _)| *wd == weekday)
        .map(|(_, name)| *name)
        .unwrap_or("Monday")
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidFrequencyRule {
    #[error("Unknown frequency type: `{0}`")]
    UnknownType(String),
    #[error("For a weekly frequency, you must select at least one day.")]
    NoWeekdays,
    #[error("`{0}` is not a weekday name. Use full English names like `Monday`.")]
    UnknownWeekday(String),
    #[error("For a monthly frequency, you must provide a valid day of the month (1-31).")]
    InvalidDayOfMonth,
}

/// Non-empty set of weekdays, kept in the order they were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySet(Vec<Weekday>);

impl WeekdaySet {
    pub fn new(weekdays: Vec<Weekday>) -> Result<Self, InvalidFrequencyRule> {
        let mut days: Vec<Weekday> = Vec::with_capacity(weekdays.len());
        for weekday in weekdays {
            if !days.contains(&weekday) {
                days.push(weekday);
            }
        }
        if days.is_empty() {
            return Err(InvalidFrequencyRule::NoWeekdays);
        }
        Ok(Self(days))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0.contains(&weekday)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|wd| weekday_name(*wd)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfMonth(u32);

impl DayOfMonth {
    pub fn new(day: u32) -> Result<Self, InvalidFrequencyRule> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(InvalidFrequencyRule::InvalidDayOfMonth)
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// How often a `Medication` recurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyRule {
    Daily,
    Weekly(WeekdaySet),
    /// There is no clamping for short months: day 31 is never due in a
    /// 30 day month.
    Monthly(DayOfMonth),
    /// Taken on demand, never reminded about
    AsNeeded,
}

impl FrequencyRule {
    pub const DAILY: &'static str = "Daily";
    pub const WEEKLY: &'static str = "Weekly";
    pub const MONTHLY: &'static str = "Monthly";
    pub const AS_NEEDED: &'static str = "As-Needed";

    /// Builds a rule from its stored representation: a frequency type and
    /// the polymorphic details (a list of weekday names for weekly rules,
    /// an integer day of month for monthly rules).
    pub fn parse(
        frequency_type: &str,
        details: Option<&Value>,
    ) -> Result<Self, InvalidFrequencyRule> {
        match frequency_type {
            Self::DAILY => Ok(Self::Daily),
            Self::AS_NEEDED | "As Needed" => Ok(Self::AsNeeded),
            Self::WEEKLY => {
                let names = match details {
                    Some(Value::Array(names)) => names,
                    _ => return Err(InvalidFrequencyRule::NoWeekdays),
                };
                let mut weekdays = Vec::with_capacity(names.len());
                for name in names {
                    let weekday = name
                        .as_str()
                        .and_then(parse_weekday_name)
                        .ok_or_else(|| {
                            let name = match name.as_str() {
                                Some(name) => name.to_string(),
                                None => name.to_string(),
                            };
                            InvalidFrequencyRule::UnknownWeekday(name)
                        })?;
                    weekdays.push(weekday);
                }
                WeekdaySet::new(weekdays).map(Self::Weekly)
            }
            Self::MONTHLY => {
                let day = details
                    .and_then(|d| d.as_u64())
                    .ok_or(InvalidFrequencyRule::InvalidDayOfMonth)?;
                if day > 31 {
                    return Err(InvalidFrequencyRule::InvalidDayOfMonth);
                }
                DayOfMonth::new(day as u32).map(Self::Monthly)
            }
            other => Err(InvalidFrequencyRule::UnknownType(other.to_string())),
        }
    }

    pub fn frequency_type(&self) -> &'static str {
        match self {
            Self::Daily => Self::DAILY,
            Self::Weekly(_) => Self::WEEKLY,
            Self::Monthly(_) => Self::MONTHLY,
            Self::AsNeeded => Self::AS_NEEDED,
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Weekly(days) => Some(Value::from(days.names())),
            Self::Monthly(day) => Some(Value::from(day.get())),
            Self::Daily | Self::AsNeeded => None,
        }
    }

    pub fn is_due(&self, weekday: Weekday, day_of_month: u32) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly(days) => days.contains(weekday),
            Self::Monthly(day) => day.get() == day_of_month,
            Self::AsNeeded => false,
        }
    }

    pub fn is_due_on(&self, day: &CivilDay) -> bool {
        self.is_due(day.weekday(), day.day_of_month())
    }
}

/// Due-today evaluation straight from the stored representation.
///
/// Malformed rules and unknown weekday names are never due.
pub fn is_due_today(
    frequency_type: &str,
    frequency_details: Option<&Value>,
    today_weekday_name: &str,
    today_day_of_month: u32,
) -> bool {
    let rule = match FrequencyRule::parse(frequency_type, frequency_details) {
        Ok(rule) => rule,
        Err(_) => return false,
    };
    match parse_weekday_name(today_weekday_name) {
        Some(weekday) => rule.is_due(weekday, today_day_of_month),
        None => false,
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidMedicationTiming {
    #[error("Meal timing is required for this timing type.")]
    MissingMealTiming,
    #[error("Specific time is required for this timing type.")]
    MissingSpecificTime,
    #[error("Unknown timing type: `{0}`")]
    UnknownType(String),
}

/// When during the day a `Medication` should be taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MedicationTiming {
    /// Free text relative to a meal, e.g. "after breakfast"
    MealRelated(String),
    SpecificTime(NaiveTime),
    /// Stored rows that carry no usable timing
    Anytime,
}

impl MedicationTiming {
    pub const MEAL_RELATED: &'static str = "Meal-Related";
    pub const SPECIFIC_TIME: &'static str = "Specific-Time";
    pub const ANYTIME: &'static str = "Anytime";

    pub fn parse(
        timing_type: &str,
        meal_timing: Option<&str>,
        specific_time: Option<NaiveTime>,
    ) -> Result<Self, InvalidMedicationTiming> {
        match timing_type {
            Self::MEAL_RELATED => match meal_timing.map(str::trim) {
                Some(text) if !text.is_empty() => Ok(Self::MealRelated(text.to_string())),
                _ => Err(InvalidMedicationTiming::MissingMealTiming),
            },
            Self::SPECIFIC_TIME => specific_time
                .map(Self::SpecificTime)
                .ok_or(InvalidMedicationTiming::MissingSpecificTime),
            other => Err(InvalidMedicationTiming::UnknownType(other.to_string())),
        }
    }

    /// Lenient counterpart of `parse` for rows that are already stored
    pub fn from_stored(
        timing_type: &str,
        meal_timing: Option<&str>,
        specific_time: Option<NaiveTime>,
    ) -> Self {
        Self::parse(timing_type, meal_timing, specific_time).unwrap_or(Self::Anytime)
    }

    pub fn timing_type(&self) -> &'static str {
        match self {
            Self::MealRelated(_) => Self::MEAL_RELATED,
            Self::SpecificTime(_) => Self::SPECIFIC_TIME,
            Self::Anytime => Self::ANYTIME,
        }
    }

    pub fn meal_timing(&self) -> Option<&str> {
        match self {
            Self::MealRelated(text) => Some(text),
            _ => None,
        }
    }

    pub fn specific_time(&self) -> Option<NaiveTime> {
        match self {
            Self::SpecificTime(time) => Some(*time),
            _ => None,
        }
    }

    /// Human readable description used in reminders, e.g. "after lunch"
    /// or "08:30 PM"
    pub fn describe(&self) -> String {
        match self {
            Self::MealRelated(text) => text.clone(),
            Self::SpecificTime(time) => time.format("%I:%M %p").to_string(),
            Self::Anytime => Self::ANYTIME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Medication {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub dosage: String,
    pub timing: MedicationTiming,
    pub frequency: FrequencyRule,
    /// Informational only, reminders look at the `MedicationLog`s
    pub last_taken_at: Option<DateTime<Utc>>,
}

impl Medication {
    pub fn new(
        user_id: ID,
        name: String,
        dosage: String,
        timing: MedicationTiming,
        frequency: FrequencyRule,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            dosage,
            timing,
            frequency,
            last_taken_at: None,
        }
    }

    pub fn is_due_on(&self, day: &CivilDay) -> bool {
        self.frequency.is_due_on(day)
    }
}

impl Entity for Medication {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Medication {
    fn owner_id(&self) -> &ID {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil_day::INDIA_STANDARD_TIME;
    use serde_json::json;

    const ALL_WEEKDAYS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    #[test]
    fn daily_is_always_due() {
        for weekday in ALL_WEEKDAYS.iter() {
            for day in 1..=31 {
                assert!(is_due_today("Daily", None, weekday, day));
            }
        }
    }

    #[test]
    fn weekly_is_due_on_listed_days_only() {
        let details = json!(["Monday", "Thursday"]);
        assert!(!is_due_today("Weekly", Some(&details), "Wednesday", 17));
        assert!(is_due_today("Weekly", Some(&details), "Monday", 15));

        for weekday in ALL_WEEKDAYS.iter() {
            let expected = *weekday == "Monday" || *weekday == "Thursday";
            assert_eq!(is_due_today("Weekly", Some(&details), weekday, 1), expected);
        }
    }

    #[test]
    fn weekday_names_match_exactly() {
        let details = json!(["Monday"]);
        assert!(!is_due_today("Weekly", Some(&details), "monday", 15));
        assert!(!is_due_today("Weekly", Some(&details), "Mon", 15));

        let lowercase = json!(["monday"]);
        assert_eq!(
            FrequencyRule::parse("Weekly", Some(&lowercase)),
            Err(InvalidFrequencyRule::UnknownWeekday("monday".into()))
        );
    }

    #[test]
    fn monthly_is_due_on_matching_day() {
        let details = json!(15);
        assert!(is_due_today("Monthly", Some(&details), "Monday", 15));
        assert!(!is_due_today("Monthly", Some(&details), "Monday", 16));

        // No clamping for short months
        let rule = FrequencyRule::parse("Monthly", Some(&json!(31))).unwrap();
        let april_30 = CivilDay::new(
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            INDIA_STANDARD_TIME,
        );
        assert!(!rule.is_due_on(&april_30));
    }

    #[test]
    fn as_needed_is_never_due() {
        for weekday in ALL_WEEKDAYS.iter() {
            for day in 1..=31 {
                assert!(!is_due_today("As-Needed", None, weekday, day));
            }
        }
    }

    #[test]
    fn malformed_rules_fail_closed() {
        assert!(!is_due_today("Hourly", None, "Monday", 1));
        assert!(!is_due_today("Weekly", None, "Monday", 1));
        assert!(!is_due_today("Weekly", Some(&json!([])), "Monday", 1));
        assert!(!is_due_today("Weekly", Some(&json!("Monday")), "Monday", 1));
        assert!(!is_due_today("Monthly", Some(&json!("15")), "Monday", 15));
        assert!(!is_due_today("Monthly", Some(&json!(0)), "Monday", 0));
        assert!(!is_due_today("Monthly", Some(&json!(32)), "Monday", 32));
        assert!(!is_due_today("Daily", None, "Someday", 1));
    }

    #[test]
    fn rejects_malformed_rules() {
        assert_eq!(
            FrequencyRule::parse("Weekly", Some(&json!([]))),
            Err(InvalidFrequencyRule::NoWeekdays)
        );
        assert_eq!(
            FrequencyRule::parse("Monthly", Some(&json!(32))),
            Err(InvalidFrequencyRule::InvalidDayOfMonth)
        );
        assert_eq!(
            FrequencyRule::parse("Monthly", None),
            Err(InvalidFrequencyRule::InvalidDayOfMonth)
        );
        assert_eq!(
            FrequencyRule::parse("Fortnightly", None),
            Err(InvalidFrequencyRule::UnknownType("Fortnightly".into()))
        );
    }

    #[test]
    fn stored_representation_survives() {
        let rule = FrequencyRule::parse("Weekly", Some(&json!(["Friday", "Monday", "Friday"])))
            .unwrap();
        assert_eq!(rule.frequency_type(), "Weekly");
        assert_eq!(rule.details(), Some(json!(["Friday", "Monday"])));

        let rule = FrequencyRule::parse("Monthly", Some(&json!(15))).unwrap();
        assert_eq!(rule.details(), Some(json!(15)));
        assert_eq!(FrequencyRule::AsNeeded.details(), None);
    }

    #[test]
    fn describes_timing() {
        let timing = MedicationTiming::parse("Meal-Related", Some("after lunch"), None).unwrap();
        assert_eq!(timing.describe(), "after lunch");

        let time = NaiveTime::from_hms_opt(20, 30, 0).unwrap();
        let timing = MedicationTiming::parse("Specific-Time", None, Some(time)).unwrap();
        assert_eq!(timing.describe(), "08:30 PM");

        assert_eq!(MedicationTiming::Anytime.describe(), "Anytime");
    }

    #[test]
    fn timing_requires_matching_field() {
        assert_eq!(
            MedicationTiming::parse("Meal-Related", Some("  "), None),
            Err(InvalidMedicationTiming::MissingMealTiming)
        );
        assert_eq!(
            MedicationTiming::parse("Specific-Time", Some("after lunch"), None),
            Err(InvalidMedicationTiming::MissingSpecificTime)
        );
        assert_eq!(
            MedicationTiming::from_stored("Meal-Related", None, None),
            MedicationTiming::Anytime
        );
    }
}
