use crate::domain::outcome::PollOutcome;
use crate::error::Result;
use std::io::Write;

/// Writes terminal outcomes as one JSON document per line.
pub struct OutcomeWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_outcome(&mut self, outcome: &PollOutcome) -> Result<()> {
        serde_json::to_writer(&mut self.writer, outcome)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Process exit code for an outcome.
pub fn exit_code(outcome: &PollOutcome) -> i32 {
    match outcome {
        PollOutcome::Accepted { .. } => 0,
        PollOutcome::Rejected { .. } => 2,
        PollOutcome::TimedOut { .. } => 3,
    }
}
