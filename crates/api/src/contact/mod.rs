pub mod create_contact;
pub mod delete_contact;
pub mod update_contact;

/// Digits with optional `+`, spaces, dashes and parentheses
fn is_valid_phone_number(phone_number: &str) -> bool {
    let digits = phone_number.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 5
        && phone_number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'))
}
