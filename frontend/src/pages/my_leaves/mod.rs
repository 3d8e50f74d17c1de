pub mod components;
pub mod enrich;
pub mod layout;
pub mod panel;
pub mod repository;
pub mod store;
pub mod types;
pub mod utils;
pub mod view_model;

pub use panel::MyLeavesPage;
