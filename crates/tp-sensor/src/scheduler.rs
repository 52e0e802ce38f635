//! The sampling loop: acquire, convert, report, wait.

use crate::convert::{ConversionResult, convert};
use crate::error::ReportResult;
use crate::model::ThermistorModel;
use crate::report::{BANNER, Report};
use crate::reporter::Reporter;
use crate::sampled::{SampleClock, SampleConfig, SystemTimer, Timer};
use crate::source::AcquisitionSource;
use tracing::{debug, info, warn};

/// Drives the acquisition → conversion → report pipeline on a fixed cadence.
///
/// Single-threaded. The only suspension point is the blocking sleep between
/// cycles. Faults and I/O failures are logged and the loop moves on; nothing
/// short of process termination stops [`Scheduler::run_forever`].
pub struct Scheduler<S, R, T = SystemTimer> {
    source: S,
    reporter: R,
    timer: T,
    model: ThermistorModel,
    clock: SampleClock,
    cycle: u64,
}

impl<S, R, T> Scheduler<S, R, T>
where
    S: AcquisitionSource,
    R: Reporter,
    T: Timer,
{
    /// Build a scheduler for the Grove v1.2 sensor at its fixed 1 s cadence.
    pub fn new(source: S, reporter: R, timer: T) -> Self {
        let clock = SampleClock::new(SampleConfig::default(), timer.now());
        Self {
            source,
            reporter,
            timer,
            model: ThermistorModel::grove_v1_2(),
            clock,
            cycle: 0,
        }
    }

    /// Use a different thermistor model.
    pub fn with_model(mut self, model: ThermistorModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &ThermistorModel {
        &self.model
    }

    /// Number of cycles run so far, including ones that produced no sample.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn into_parts(self) -> (S, R, T) {
        (self.source, self.reporter, self.timer)
    }

    /// Startup gate: wait for the sink, print the banner, start the clock.
    pub fn start(&mut self) -> ReportResult<()> {
        self.reporter.wait_ready()?;
        self.reporter.banner(BANNER)?;
        self.clock.reset(self.timer.now());
        info!(
            beta = self.model.beta(),
            reference_ohms = self.model.reference_resistance_ohms(),
            interval = ?self.clock.config.interval,
            "sampling started"
        );
        Ok(())
    }

    /// Run one cycle without waiting.
    ///
    /// Returns the report handed to the reporter, or `None` if no sample
    /// could be acquired.
    pub fn step(&mut self) -> Option<Report> {
        self.cycle += 1;
        let cycle = self.cycle;

        let raw = match self.source.read_raw() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(cycle, error = %err, "acquisition failed; skipping cycle");
                return None;
            }
        };

        let result = convert(raw, &self.model);
        match result {
            ConversionResult::Temperature(reading) => debug!(
                cycle,
                raw = raw.value(),
                resistance_ohms = reading.resistance_ohms,
                celsius = reading.celsius,
                "sample converted"
            ),
            ConversionResult::Fault(fault) => {
                warn!(cycle, raw = raw.value(), %fault, "sensor fault")
            }
        }

        let report = Report::new(cycle, raw, result);
        if let Err(err) = self.reporter.report(&report) {
            warn!(cycle, error = %err, "failed to emit report");
        }
        Some(report)
    }

    /// Block until the next sample is due.
    pub fn wait_next(&mut self) {
        let wait = self.clock.time_until_sample(self.timer.now());
        if !wait.is_zero() {
            self.timer.sleep(wait);
        }
        self.clock.advance(self.timer.now());
    }

    /// Run `cycles` full cycles (each followed by its wait).
    pub fn run_cycles(&mut self, cycles: usize) -> Vec<Report> {
        let mut reports = Vec::with_capacity(cycles);
        for _ in 0..cycles {
            reports.extend(self.step());
            self.wait_next();
        }
        reports
    }

    /// Pass the startup gate, then sample forever.
    pub fn run_forever(mut self) -> ! {
        while let Err(err) = self.start() {
            warn!(error = %err, "output sink not ready; retrying");
            self.timer.sleep(self.clock.config.interval);
        }
        loop {
            self.step();
            self.wait_next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::SensorFault;
    use crate::error::ReportError;
    use crate::reporter::TextReporter;
    use crate::source::ScriptedSource;
    use std::io;
    use std::time::{Duration, Instant};

    struct FakeTimer {
        now: Instant,
        sleeps: Vec<Duration>,
    }

    impl FakeTimer {
        fn new() -> Self {
            Self {
                now: Instant::now(),
                sleeps: Vec::new(),
            }
        }
    }

    impl Timer for FakeTimer {
        fn now(&self) -> Instant {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
            self.now += duration;
        }
    }

    struct BrokenReporter {
        attempts: usize,
    }

    impl Reporter for BrokenReporter {
        fn banner(&mut self, _text: &str) -> ReportResult<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed").into())
        }

        fn report(&mut self, _report: &Report) -> ReportResult<()> {
            self.attempts += 1;
            Err(ReportError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "closed",
            )))
        }
    }

    fn lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn every_sample_produces_one_report_line() {
        let source = ScriptedSource::from_codes(&[511, 0, 900]).unwrap();
        let mut scheduler = Scheduler::new(source, TextReporter::new(Vec::new()), FakeTimer::new());

        scheduler.start().unwrap();
        let reports = scheduler.run_cycles(3);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[1].result.fault(), Some(SensorFault::Disconnected));
        assert_eq!(
            lines(scheduler.reporter().get_ref()),
            vec![
                BANNER,
                "Raw Value: 511 | Celsius: 24.96",
                "Error: Raw value is 0. Check your Grove cable!",
                "Raw Value: 900 | Celsius: 77.32",
            ]
        );
    }

    #[test]
    fn sleeps_one_interval_per_cycle() {
        let source = ScriptedSource::from_codes(&[100, 200, 300]).unwrap();
        let mut scheduler = Scheduler::new(source, TextReporter::new(io::sink()), FakeTimer::new());

        scheduler.start().unwrap();
        scheduler.run_cycles(3);

        assert_eq!(
            scheduler.timer().sleeps,
            vec![Duration::from_millis(1000); 3]
        );
    }

    #[test]
    fn exhausted_source_skips_report_but_keeps_cycling() {
        let source = ScriptedSource::from_codes(&[511]).unwrap();
        let mut scheduler = Scheduler::new(source, TextReporter::new(Vec::new()), FakeTimer::new());

        scheduler.start().unwrap();
        let reports = scheduler.run_cycles(4);

        assert_eq!(reports.len(), 1);
        assert_eq!(scheduler.cycles(), 4);
        assert_eq!(scheduler.timer().sleeps.len(), 4);
    }

    #[test]
    fn reporter_failure_does_not_stop_the_loop() {
        let source = ScriptedSource::repeating([crate::RawSample::ZERO]);
        let mut scheduler =
            Scheduler::new(source, BrokenReporter { attempts: 0 }, FakeTimer::new());

        assert!(scheduler.start().is_err());
        let reports = scheduler.run_cycles(5);

        assert_eq!(reports.len(), 5);
        assert!(reports.iter().all(|r| r.result.is_fault()));
        assert_eq!(scheduler.reporter().attempts, 5);
    }

    #[test]
    fn cycle_numbers_are_one_based() {
        let source = ScriptedSource::from_codes(&[1, 2]).unwrap();
        let mut scheduler = Scheduler::new(source, TextReporter::new(io::sink()), FakeTimer::new());
        let reports = scheduler.run_cycles(2);
        let cycles: Vec<u64> = reports.iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![1, 2]);
    }

    #[test]
    fn custom_model_is_used() {
        let model = ThermistorModel::new(4250.0, tp_core::ohms(100_000.0)).unwrap();
        let source = ScriptedSource::from_codes(&[511]).unwrap();
        let mut scheduler = Scheduler::new(source, TextReporter::new(io::sink()), FakeTimer::new())
            .with_model(model);

        let report = scheduler.step().unwrap();
        assert_eq!(scheduler.model(), &model);
        assert_eq!(report.result, convert(report.raw, &model));
    }
}
