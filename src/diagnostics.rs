/// Receives human-readable diagnostics from the session layer.
///
/// The geometry core never logs; it returns errors and lets the session
/// decide what to report.
pub trait DiagnosticSink {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `armesh` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "armesh", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "armesh", "{message}");
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
