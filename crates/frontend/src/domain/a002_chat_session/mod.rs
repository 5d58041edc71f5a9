pub mod service;
pub mod ui;

pub use service::SessionService;
