pub mod engine;
pub mod mode;
pub mod progress;
pub mod scheduler;
