//! Chat messages: ask a question, list a session's transcript, edit/delete.

use crate::shared::api::{ApiClient, ApiError, CancelToken};
use chrono::Utc;
use contracts::domain::a003_chat_message::{
    AskParams, AskResponse, ChatExchange, ChatMessage, ChatMessageResponse, UpdateChatMessageRequest,
};
use contracts::shared::{Listing, PageRequest, PaginatedResponse, Single};

#[derive(Clone)]
pub struct ChatService {
    api: ApiClient,
}

fn item_path(id: &str) -> String {
    format!("/chats/{}", urlencoding::encode(id))
}

impl ChatService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /chats?session_id=&question=&k=`
    pub async fn ask(&self, params: &AskParams, cancel: &CancelToken) -> Result<ChatExchange, ApiError> {
        let resp: Single<AskResponse> = self.api.post_query("/chats", params, cancel).await?;
        let resp = resp.into_inner();
        log::debug!(
            "answer for session {}: {} chunks, {} sources",
            params.session_id,
            resp.chunks_used,
            resp.sources.len()
        );
        Ok(resp.into_exchange(&params.session_id, Utc::now())?)
    }

    /// Messages of one session, oldest first
    pub async fn list_by_session(
        &self,
        session_id: &str,
        page: PageRequest,
        cancel: &CancelToken,
    ) -> Result<PaginatedResponse<ChatMessage>, ApiError> {
        let path = format!("/chats/session/{}", urlencoding::encode(session_id));
        let listing: Listing<ChatMessageResponse> = self.api.get_query(&path, &page.query(), cancel).await?;
        let mut page = listing.into_page(page).try_map(ChatMessage::try_from)?;
        ChatMessage::sort_by_creation(&mut page.data);
        Ok(page)
    }

    pub async fn get(&self, id: &str, cancel: &CancelToken) -> Result<ChatMessage, ApiError> {
        let resp: Single<ChatMessageResponse> = self.api.get(&item_path(id), cancel).await?;
        Ok(ChatMessage::try_from(resp.into_inner())?)
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateChatMessageRequest,
        cancel: &CancelToken,
    ) -> Result<ChatMessage, ApiError> {
        let resp: Single<ChatMessageResponse> = self.api.put_json(&item_path(id), request, cancel).await?;
        Ok(ChatMessage::try_from(resp.into_inner())?)
    }

    pub async fn delete(&self, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        self.api.delete(&item_path(id), cancel).await
    }
}
