pub mod password;
pub mod postgres;
