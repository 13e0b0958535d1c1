pub mod layout;
pub mod week;
