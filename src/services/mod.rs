pub mod fs;
pub mod tracing_setup;
