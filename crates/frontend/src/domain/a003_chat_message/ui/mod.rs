//! Chat page (MVVM)
//!
//! - model.rs: service calls with degraded-mode substitution
//! - view_model.rs: `ChatPageVm` signals and commands
//! - view.rs: `ChatPage`
//! - message_bubble.rs, suggestions.rs: presentational pieces

mod message_bubble;
mod model;
mod suggestions;
mod view;
mod view_model;

pub use message_bubble::MessageBubble;
pub use suggestions::{SuggestionsSidebar, SUGGESTIONS};
pub use view::ChatPage;
pub use view_model::ChatPageVm;
