use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing outcome of a verb (a toast, in GUI terms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Fire-and-forget sink for notices. Sending never blocks or fails; if the
/// receiving side is gone the notice is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message.into());
    }

    fn emit(&self, level: NoticeLevel, message: String) {
        let _ = self.tx.send(Notice { level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("one");
        notifier.error("two");

        assert_eq!(rx.try_recv().unwrap().level, NoticeLevel::Success);
        assert_eq!(rx.try_recv().unwrap().message, "two");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.error("nobody listening");
    }
}
