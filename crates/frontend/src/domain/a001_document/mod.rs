pub mod library;
pub mod service;
pub mod ui;

pub use service::DocumentService;
