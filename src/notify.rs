/// Sink for user-facing messages.
///
/// `alert` is a blocking notice the user has to acknowledge; `info` is a
/// passing confirmation and may be dropped.
pub trait Notifier {
    fn alert(&mut self, message: &str);

    fn info(&mut self, _message: &str) {}
}

/// Notifier that only records messages, for headless use.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub infos: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        tracing::warn!("alert: {message}");
        self.alerts.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}
