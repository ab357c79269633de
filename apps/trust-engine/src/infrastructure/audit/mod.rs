pub mod tracing_sink;
pub mod traits;
