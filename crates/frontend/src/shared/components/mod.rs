pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;
pub mod status_badge;
pub mod status_banner;

pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
pub use stat_card::{StatCard, StatTone};
pub use status_badge::StatusBadge;
pub use status_banner::{DegradedBanner, ErrorBanner};
