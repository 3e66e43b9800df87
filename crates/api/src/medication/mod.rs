pub mod create_medication;
pub mod delete_medication;
pub mod get_taken_on_day;
pub mod mark_medication_taken;
mod subscribers;
pub mod update_medication;

const MAX_FIELD_LENGTH: usize = 100;

/// Name and dosage are required and short
fn validate_field(value: &str) -> Option<String> {
    let value = value.trim();
    let len = value.chars().count();
    if len == 0 || len > MAX_FIELD_LENGTH {
        None
    } else {
        Some(value.to_string())
    }
}
