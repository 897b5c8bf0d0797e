//! Embassy async tasks
//!
//! Each task runs independently and communicates via the step channel or
//! by reading the shared encoder.

pub mod edges;
pub mod report;
pub mod steps;

pub use edges::edge_task;
pub use report::report_task;
pub use steps::step_log_task;
