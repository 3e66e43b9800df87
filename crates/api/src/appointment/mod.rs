pub mod create_appointment;
pub mod delete_appointment;
pub mod update_appointment;
