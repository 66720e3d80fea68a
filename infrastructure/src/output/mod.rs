//! Run context and filesystem output sink

pub mod run_context;
pub mod sink;

pub use run_context::RunContext;
pub use sink::FsOutputSink;
