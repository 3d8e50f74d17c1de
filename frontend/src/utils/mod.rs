pub mod location;
pub mod time;
