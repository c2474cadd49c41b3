pub mod error;
pub mod form;
pub mod id;
pub mod profile;
pub mod validation;

pub use error::Error;
pub use profile::PublicProfile;
