//! Presentational session widgets; the chat page owns the data.

mod new_session_form;
mod session_list;

pub use new_session_form::NewSessionForm;
pub use session_list::SessionList;
