pub mod chores;
pub mod economy;
pub mod inventory;
pub mod mood;
pub mod rooms;
pub mod session;
pub mod stats;
pub mod time;
