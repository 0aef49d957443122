//! Fake benchmark units with scripted failures and lifecycle counters.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use fftcmp::{BenchmarkUnit, Catalog, LibraryEntry, TransformKind, UnitError};

/// Lifecycle calls observed across every unit built from one entry.
#[derive(Debug, Default)]
pub struct Counters {
    pub prepared: Cell<usize>,
    pub executed: Cell<u64>,
    pub released: Cell<usize>,
}

/// Behaviour script shared by all units of one fake library.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Busy-wait this long inside every `execute_once`.
    pub work: Duration,
    /// Sizes for which `prepare` fails.
    pub fail_prepare: Vec<usize>,
    /// `execute_once` fails on this call number (1-based).
    pub fail_execute_on: Option<u64>,
}

impl Script {
    pub fn working(work: Duration) -> Self {
        Self {
            work,
            ..Default::default()
        }
    }
}

pub struct FakeUnit {
    name: String,
    size: usize,
    kind: TransformKind,
    script: Script,
    counters: Rc<Counters>,
    calls: u64,
    prepared: bool,
}

impl FakeUnit {
    pub fn new(
        name: &str,
        size: usize,
        kind: TransformKind,
        script: Script,
        counters: Rc<Counters>,
    ) -> Self {
        Self {
            name: name.to_string(),
            size,
            kind,
            script,
            counters,
            calls: 0,
            prepared: false,
        }
    }
}

impl BenchmarkUnit for FakeUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.size
    }

    fn kind(&self) -> TransformKind {
        self.kind
    }

    fn prepare(&mut self) -> Result<(), UnitError> {
        if self.script.fail_prepare.contains(&self.size) {
            return Err(UnitError::Plan(format!("no plan for {}", self.size)));
        }
        self.counters.prepared.set(self.counters.prepared.get() + 1);
        self.prepared = true;
        Ok(())
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        if !self.prepared {
            return Err(UnitError::NotPrepared);
        }
        self.calls += 1;
        if self.script.fail_execute_on == Some(self.calls) {
            return Err(UnitError::Transform("scripted failure".into()));
        }
        let start = Instant::now();
        while start.elapsed() < self.script.work {
            std::hint::spin_loop();
        }
        self.counters.executed.set(self.counters.executed.get() + 1);
        Ok(())
    }

    fn release(&mut self) {
        self.prepared = false;
        self.counters.released.set(self.counters.released.get() + 1);
    }
}

/// Catalog entry producing [`FakeUnit`]s that share one set of counters.
pub fn fake_entry(id: &'static str, script: Script) -> (LibraryEntry, Rc<Counters>) {
    let counters = Rc::new(Counters::default());
    let shared = Rc::clone(&counters);
    let entry = LibraryEntry::new(id, id, "fake library", move |size, kind| {
        Box::new(FakeUnit::new(
            id,
            size,
            kind,
            script.clone(),
            Rc::clone(&shared),
        )) as Box<dyn BenchmarkUnit>
    });
    (entry, counters)
}

pub fn catalog_of(entries: Vec<LibraryEntry>) -> Catalog {
    Catalog::from_entries(entries).unwrap()
}
