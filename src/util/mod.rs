pub mod figment;
pub mod sensitive;
pub mod time;
pub mod validator;

pub use sensitive::Sensitive;
