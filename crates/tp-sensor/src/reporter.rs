//! Reporter port and its text/JSON adapters.

use crate::error::ReportResult;
use crate::report::Report;
use serde::Serialize;
use std::io::Write;

/// Port for rendering reports to an output sink.
pub trait Reporter {
    /// Block until the sink can take output.
    ///
    /// The scheduler calls this once before the first cycle.
    fn wait_ready(&mut self) -> ReportResult<()> {
        Ok(())
    }

    /// Emit a one-off banner line.
    fn banner(&mut self, text: &str) -> ReportResult<()>;

    /// Render one report.
    fn report(&mut self, report: &Report) -> ReportResult<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn wait_ready(&mut self) -> ReportResult<()> {
        (**self).wait_ready()
    }

    fn banner(&mut self, text: &str) -> ReportResult<()> {
        (**self).banner(text)
    }

    fn report(&mut self, report: &Report) -> ReportResult<()> {
        (**self).report(report)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn wait_ready(&mut self) -> ReportResult<()> {
        (**self).wait_ready()
    }

    fn banner(&mut self, text: &str) -> ReportResult<()> {
        (**self).banner(text)
    }

    fn report(&mut self, report: &Report) -> ReportResult<()> {
        (**self).report(report)
    }
}

/// Writes [`Report::status_line`] text, one flushed line per report.
pub struct TextReporter<W: Write> {
    sink: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_line(&mut self, line: &str) -> ReportResult<()> {
        writeln!(self.sink, "{line}")?;
        self.sink.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn wait_ready(&mut self) -> ReportResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn banner(&mut self, text: &str) -> ReportResult<()> {
        self.write_line(text)
    }

    fn report(&mut self, report: &Report) -> ReportResult<()> {
        self.write_line(&report.status_line())
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonLine<'a> {
    Banner { text: &'a str },
    Report(&'a Report),
}

/// Writes one JSON object per line, for machine consumers of the stream.
pub struct JsonLinesReporter<W: Write> {
    sink: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_line(&mut self, line: &JsonLine<'_>) -> ReportResult<()> {
        serde_json::to_writer(&mut self.sink, line)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn wait_ready(&mut self) -> ReportResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn banner(&mut self, text: &str) -> ReportResult<()> {
        self.write_line(&JsonLine::Banner { text })
    }

    fn report(&mut self, report: &Report) -> ReportResult<()> {
        self.write_line(&JsonLine::Report(report))
    }
}
