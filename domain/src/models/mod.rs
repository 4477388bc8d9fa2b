pub mod primitives;
mod account;
mod credential;

pub use account::*;
pub use credential::*;
