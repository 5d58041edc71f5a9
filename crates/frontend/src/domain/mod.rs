pub mod a001_document;
pub mod a002_chat_session;
pub mod a003_chat_message;
