//! Response envelopes.
//!
//! Single resources arrive as `{ "data": T }`, collections as
//! `{ "data": [...], "page", "per_page", "total", "total_pages" }`.
//! Older routes still answer with the bare payload, so decoding accepts both.

use serde::{Deserialize, Serialize};

/// `{ data, message?, success? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<PageRequest> {
        self.has_more().then(|| PageRequest::new(self.page + 1, self.per_page))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PaginatedResponse<U>, E> {
        let data = self.data.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(PaginatedResponse {
            data,
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        })
    }

    /// Build a page from a bare array answered for `request`.
    ///
    /// A short page is the last one; a full page implies at least one more.
    pub fn from_slice(data: Vec<T>, request: PageRequest) -> Self {
        let len = data.len() as u64;
        let seen = request.offset() + len;
        let is_last = len < u64::from(request.per_page);
        Self {
            data,
            page: request.page,
            per_page: request.per_page,
            total: if is_last { seen } else { seen + 1 },
            total_pages: if is_last { request.page } else { request.page + 1 },
        }
    }
}

/// 1-based page addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Number of items skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Query pairs understood by the backend: both page and offset addressing
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
            skip: self.offset(),
            limit: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    pub skip: u64,
    pub limit: u32,
}

/// Single-resource body: `{ "data": T }` or bare `T`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Single<T> {
    Wrapped(ApiResponse<T>),
    Bare(T),
}

impl<T> Single<T> {
    pub fn into_inner(self) -> T {
        match self {
            Single::Wrapped(envelope) => envelope.data,
            Single::Bare(value) => value,
        }
    }
}

/// Collection body: paginated envelope, `{ "data": [...] }` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(PaginatedResponse<T>),
    Wrapped(ApiResponse<Vec<T>>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_page(self, request: PageRequest) -> PaginatedResponse<T> {
        match self {
            Listing::Paged(page) => page,
            Listing::Wrapped(envelope) => PaginatedResponse::from_slice(envelope.data, request),
            Listing::Bare(items) => PaginatedResponse::from_slice(items, request),
        }
    }
}
