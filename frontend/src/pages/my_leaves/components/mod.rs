pub mod detail_modal;
pub mod filter;
pub mod list;
pub mod pagination;
pub mod status_badge;
