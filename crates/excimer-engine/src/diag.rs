//! Optional diagnostic narration.
//!
//! A [`DiagnosticSink`] receives a human-readable line per executed
//! event and for status reports. Sinks are strictly observers: whether
//! one is attached never changes the simulation outcome (no RNG draws,
//! no state reads that feed back into the dynamics).

/// Receiver for human-readable event narration.
pub trait DiagnosticSink {
    /// Record one narration line.
    fn record(&mut self, message: &str);
}

/// A sink that appends every line to an in-memory buffer.
///
/// Useful in tests and for postmortem inspection of short runs.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The narration lines recorded so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl DiagnosticSink for BufferSink {
    fn record(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

/// Shared sink handle: hand a clone to a simulation and keep one to read
/// the narration afterwards.
impl<S: DiagnosticSink> DiagnosticSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn record(&mut self, message: &str) {
        self.borrow_mut().record(message);
    }
}
