pub mod aggregate;
pub mod ask;

pub use aggregate::{
    ChatMessage, ChatMessageResponse, Citation, MessageMetadata, MessageRole, SourceCitation,
    UpdateChatMessageRequest,
};
pub use ask::{AskParams, AskResponse, ChatExchange, CitedExcerpt, DEFAULT_TOP_K};
