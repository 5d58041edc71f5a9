pub mod api;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod fallback;
pub mod icons;
pub mod number_format;
pub mod page_state;
pub mod services;
