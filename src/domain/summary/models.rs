pub mod report;
pub mod window;

pub use report::{CategoryReport, SummaryReport, UserReport};
pub use window::ReportWindow;
