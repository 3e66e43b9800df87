pub mod panic;
pub mod usecase;
