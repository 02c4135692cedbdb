pub mod records;
pub mod sink;

pub use sink::{CsvSink, MemorySink, RowSink, SinkError};
