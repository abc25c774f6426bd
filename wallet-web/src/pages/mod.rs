//! Page modules

pub mod home;
pub mod status;

pub use home::HomePage;
pub use status::StatusPage;
