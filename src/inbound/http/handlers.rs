pub mod health_check;
pub mod me;
pub mod summary;

pub use health_check::health_check;
pub use me::me;
pub use summary::trigger_summary;
