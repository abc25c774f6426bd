//! UI Components

pub mod agent_profile;
pub mod connect_panel;
pub mod navbar;

pub use agent_profile::AgentProfile;
pub use connect_panel::ConnectPanel;
pub use navbar::Navbar;
