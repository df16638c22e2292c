//! Streaming a complete rule set into a consumer.

use crate::error::Result;
use crate::ports::RuleSink;

/// Write every line into `sink`, then close it and wait for the consumer.
///
/// A failed write drops the sink, which still closes and joins the consumer;
/// the error is returned and nothing after this step runs. An empty rule set
/// is a valid no-op write. Returns the number of lines written.
pub fn write_rules<I, S>(mut sink: Box<dyn RuleSink + '_>, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut written = 0;
    for line in lines {
        sink.write_line(line.as_ref())?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}
