mod bar_list;
mod nfe_section;
mod view;
mod view_model;

pub use bar_list::{BarList, BarRow};
pub use nfe_section::NfeSection;
pub use view::FiscalDashboard;
pub use view_model::DashboardVm;
