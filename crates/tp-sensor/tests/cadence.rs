//! Report emissions stay on the 1000 ms grid.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tp_sensor::{
    AcquisitionSource, RawSample, Report, ReportResult, Reporter, Scheduler, SourceResult,
    SystemTimer, Timer,
};

const INTERVAL: Duration = Duration::from_millis(1000);

/// Simulated clock shared between the timer and a slow source.
#[derive(Clone)]
struct SimClock(Rc<Cell<Instant>>);

impl SimClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

struct SimTimer {
    clock: SimClock,
    sleeps: Vec<Duration>,
}

impl Timer for SimTimer {
    fn now(&self) -> Instant {
        self.clock.0.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.clock.advance(duration);
    }
}

/// A digitizer that takes `latency` to produce each sample.
struct SlowSource {
    clock: SimClock,
    latency: Duration,
}

impl AcquisitionSource for SlowSource {
    fn read_raw(&mut self) -> SourceResult<RawSample> {
        self.clock.advance(self.latency);
        RawSample::new(511)
    }
}

/// Records the instant each report reached it.
#[derive(Default)]
struct StampingReporter {
    stamps: Rc<RefCell<Vec<Instant>>>,
    now: Option<SimClock>,
}

impl Reporter for StampingReporter {
    fn banner(&mut self, _text: &str) -> ReportResult<()> {
        Ok(())
    }

    fn report(&mut self, _report: &Report) -> ReportResult<()> {
        let at = match &self.now {
            Some(clock) => clock.0.get(),
            None => Instant::now(),
        };
        self.stamps.borrow_mut().push(at);
        Ok(())
    }
}

#[test]
fn work_time_is_absorbed_into_the_wait() {
    let clock = SimClock::new();
    let source = SlowSource {
        clock: clock.clone(),
        latency: Duration::from_millis(250),
    };
    let stamps = Rc::new(RefCell::new(Vec::new()));
    let reporter = StampingReporter {
        stamps: Rc::clone(&stamps),
        now: Some(clock.clone()),
    };
    let timer = SimTimer {
        clock,
        sleeps: Vec::new(),
    };
    let mut scheduler = Scheduler::new(source, reporter, timer);

    scheduler.start().unwrap();
    scheduler.run_cycles(4);

    let (_, _, timer) = scheduler.into_parts();
    assert_eq!(timer.sleeps, vec![Duration::from_millis(750); 4]);

    let stamps = stamps.borrow();
    for pair in stamps.windows(2) {
        assert_eq!(pair[1] - pair[0], INTERVAL);
    }
}

#[test]
fn overrunning_cycle_does_not_burst() {
    let clock = SimClock::new();
    let source = SlowSource {
        clock: clock.clone(),
        latency: Duration::from_millis(1600),
    };
    let timer = SimTimer {
        clock,
        sleeps: Vec::new(),
    };
    let mut scheduler = Scheduler::new(source, StampingReporter::default(), timer);

    scheduler.start().unwrap();
    scheduler.run_cycles(3);

    // Every acquisition outlasts the interval, so the loop never sleeps and
    // paces at the acquisition latency instead of catching up.
    let (_, _, timer) = scheduler.into_parts();
    assert!(timer.sleeps.is_empty());
}

#[test]
fn wall_clock_emissions_are_one_interval_apart() {
    let stamps = Rc::new(RefCell::new(Vec::new()));
    let reporter = StampingReporter {
        stamps: Rc::clone(&stamps),
        now: None,
    };
    let source = tp_sensor::ScriptedSource::from_codes(&[511, 512]).unwrap();
    let mut scheduler = Scheduler::new(source, reporter, SystemTimer);

    scheduler.start().unwrap();
    scheduler.step();
    scheduler.wait_next();
    scheduler.step();

    let stamps = stamps.borrow();
    assert_eq!(stamps.len(), 2);
    let gap = stamps[1] - stamps[0];
    assert!(gap >= Duration::from_millis(990), "gap {gap:?}");
    assert!(gap < Duration::from_millis(1500), "gap {gap:?}");
}
