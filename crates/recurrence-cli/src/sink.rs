//! JSON-lines output for planned occurrences.

use chrono::NaiveDateTime;
use recurrence_engine::{Occurrence, OccurrenceSink};
use serde::Serialize;
use std::io::{self, Write};

/// One line of `recur plan` output.
#[derive(Serialize)]
struct TaskLine<'a> {
    #[serde(flatten)]
    occurrence: &'a Occurrence,
    starts_at: Option<NaiveDateTime>,
}

/// Writes each created occurrence as a single JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> OccurrenceSink for JsonLinesSink<W> {
    type Error = io::Error;

    fn create(&mut self, occurrence: &Occurrence) -> io::Result<()> {
        let line = TaskLine {
            occurrence,
            starts_at: occurrence.starts_at(),
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")
    }
}
