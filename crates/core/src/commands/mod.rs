pub mod capacity;
pub mod instance_state;
pub mod list;
pub mod target_health;
