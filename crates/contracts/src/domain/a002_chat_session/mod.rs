pub mod aggregate;

pub use aggregate::{
    ChatSession, CreateSessionRequest, SessionFilter, SessionMetadata, SessionResponse,
    UpdateSessionRequest,
};
