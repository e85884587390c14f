//! Parse entry points.
//!
//! A parse drives the state machine over one in-memory buffer; `#include`
//! directives encountered along the way resolve against `base_dir` and run a
//! nested machine over the included file, mutating the same document.

mod machine;

use std::path::Path;

use crate::diag::MessageSink;
use crate::document::Document;

pub(crate) fn parse_str(doc: &mut Document, sink: &dyn MessageSink, base_dir: &Path, input: &str) {
    machine::Machine::new(doc, sink, base_dir).run(input);
}
