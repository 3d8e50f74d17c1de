mod attendance;
pub mod client;
mod geocode;
mod leave;
pub mod types;
mod users;

pub use attendance::ClockAction;
pub use geocode::{NOMINATIM_BASE_URL, UNKNOWN_LOCATION};
pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
