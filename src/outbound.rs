pub mod db;
pub mod notifier;
pub mod renderer;
pub mod telemetry;
