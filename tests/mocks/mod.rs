pub mod mock_collectors;
pub mod mock_sinks;

pub use mock_collectors::{MockKernelLog, MockMetricsSource};
pub use mock_sinks::{FailingSink, MemorySink, SinkJournal};
