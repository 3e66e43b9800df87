use crate::shared::entity::{Entity, ID};
use thiserror::Error;

const MIN_TIP_LENGTH: usize = 10;
const MAX_CATEGORY_LENGTH: usize = 50;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidHealthTip {
    #[error("A health tip needs at least {0} characters")]
    TooShort(usize),
    #[error("A category can have at most {0} characters")]
    CategoryTooLong(usize),
}

/// A piece of general advice shown on the dashboard. Not owned by any `User`.
#[derive(Debug, Clone)]
pub struct HealthTip {
    pub id: ID,
    pub tip_text: String,
    pub category: String,
}

impl HealthTip {
    pub const DEFAULT_CATEGORY: &'static str = "General";

    pub fn new(tip_text: String, category: Option<String>) -> Result<Self, InvalidHealthTip> {
        let tip_text = tip_text.trim().to_string();
        if tip_text.chars().count() < MIN_TIP_LENGTH {
            return Err(InvalidHealthTip::TooShort(MIN_TIP_LENGTH));
        }
        let category = match category.map(|c| c.trim().to_string()) {
            Some(c) if c.chars().count() > MAX_CATEGORY_LENGTH => {
                return Err(InvalidHealthTip::CategoryTooLong(MAX_CATEGORY_LENGTH))
            }
            Some(c) if !c.is_empty() => c,
            _ => Self::DEFAULT_CATEGORY.to_string(),
        };
        Ok(Self {
            id: Default::default(),
            tip_text,
            category,
        })
    }
}

impl Entity for HealthTip {
    fn id(&self) -> &ID {
        &self.id
    }
}
