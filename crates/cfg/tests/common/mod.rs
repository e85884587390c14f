use std::sync::Arc;

use cfg::{Config, MemorySink};

/// Parses `input` with a capturing sink so tests can assert on diagnostics.
pub fn parse(input: &str) -> (Config, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let mut config = Config::with_sink(Box::new(sink.clone()));
    config.load_str(input);
    (config, sink)
}

pub fn has_message(sink: &MemorySink, needle: &str) -> bool {
    sink.messages().iter().any(|m| m.contains(needle))
}
