pub mod fetch;
pub mod profiles;
