mod handler;

pub use handler::{DashboardStats, dashboard_stats};
