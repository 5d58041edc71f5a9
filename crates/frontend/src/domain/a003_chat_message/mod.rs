pub mod service;
pub mod transcript;
pub mod ui;

pub use service::ChatService;
pub use transcript::{PendingSend, SendRejected, Transcript, TranscriptEntry};
