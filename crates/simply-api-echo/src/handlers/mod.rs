pub mod echo;
pub mod status;
