pub mod local;
pub mod validation;
