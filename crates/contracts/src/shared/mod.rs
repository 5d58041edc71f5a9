pub mod envelope;
pub mod error;
pub mod ids;
pub mod timestamp;

pub use envelope::{ApiResponse, Listing, PageRequest, PaginatedResponse, Single};
pub use error::ContractError;
