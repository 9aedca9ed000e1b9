use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `tracing` adapter for the domain logging port.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "Catalog -- ", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "Catalog -- ", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "Catalog -- ", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "Catalog -- ", "{}", message);
    }
}
