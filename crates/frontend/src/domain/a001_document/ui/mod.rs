//! Documents page ("Base de Dados")
//!
//! - model.rs: service calls, browser file reading
//! - view_model.rs: `DocumentsPageVm`
//! - view.rs: `DocumentsPage`
//! - document_card.rs, upload_panel.rs: presentational pieces

mod document_card;
mod model;
mod upload_panel;
mod view;
mod view_model;

pub use document_card::DocumentCard;
pub use upload_panel::UploadPanel;
pub use view::DocumentsPage;
pub use view_model::DocumentsPageVm;
