pub mod d100_fiscal_overview;

pub use d100_fiscal_overview::ui::FiscalDashboard;
