/// Host channel for user-facing error messages (a dialog, a status bar,
/// a structured error list).
///
/// Exporters call this only for failures the operator has to know about,
/// at most once per simulation run.
pub trait Notifier {
    fn notify_error(&self, title: &str, message: &str);
}

/// Sends notifications to the `tracing` error log. Used when the host
/// provides no channel of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        tracing::error!(title, "{message}");
    }
}

impl<F: Fn(&str, &str)> Notifier for F {
    fn notify_error(&self, title: &str, message: &str) {
        self(title, message)
    }
}
