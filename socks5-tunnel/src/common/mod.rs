pub mod addresses;
pub mod constants;
pub mod credentials;
