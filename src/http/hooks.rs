//! Side channels the pipeline reports through.
//!
//! The pipeline never talks to a UI directly. It hands user-facing notices to
//! a [`Notifier`] and view changes to a [`Navigator`], so front ends plug in
//! their own and tests record them.

use std::time::Duration;

/// Receives user-facing notices.
pub trait Notifier: Send + Sync {
    /// Show an error notice.
    fn error(&self, message: &str);
}

/// Moves the user to another view.
pub trait Navigator: Send + Sync {
    /// Navigate to `path` once `delay` has passed. A zero delay is immediate.
    fn navigate(&self, path: &str, delay: Duration);
}

/// Notifier that writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Navigator for front ends without views; records the redirect in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str, delay: Duration) {
        if delay.is_zero() {
            log::info!("Redirecting to {path}");
        } else {
            log::info!("Redirecting to {path} in {}ms", delay.as_millis());
        }
    }
}
