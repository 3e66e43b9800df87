pub mod create_health_tip;
pub mod delete_health_tip;
pub mod update_health_tip;
