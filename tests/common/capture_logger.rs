use std::{
    cell::RefCell,
    string::{String, ToString},
    sync::Once,
    vec::Vec,
};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// A log record as seen by [`capture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Captured {
    pub(crate) level: Level,
    pub(crate) target: String,
    pub(crate) message: String,
}

thread_local! {
    static RECORDS: RefCell<Option<Vec<Captured>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with_borrow_mut(|records| {
            if let Some(records) = records {
                records.push(Captured {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Runs `f` and returns every record logged on this thread meanwhile.
pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger is installed in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });

    RECORDS.set(Some(Vec::new()));
    let result = f();
    let records = RECORDS.take().unwrap_or_default();
    (result, records)
}
