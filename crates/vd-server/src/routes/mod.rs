//! API route handlers

pub mod filters;
pub mod helpers;
pub mod plants;

pub use filters::get_filters;
pub use plants::get_plants;
