//! Shared data contracts between the fiscal assistant frontend and its REST backend.
//!
//! Wire DTOs carry timestamps as strings exactly as the backend emits them;
//! native shapes carry `DateTime<Utc>`. Conversions live next to the types.

pub mod dashboards;
pub mod domain;
pub mod shared;
