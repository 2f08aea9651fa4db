use std::cell::RefCell;

/// A queued user-facing validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub code: String,
    pub message: String,
}

/// Request-scoped error/notice channel. Operations report recoverable
/// validation problems here and consult `has_pending` to short-circuit when
/// an earlier validation pass already failed.
pub trait NoticeChannel {
    fn report(&self, code: &str, message: &str);
    fn has_pending(&self) -> bool;
}

/// Default in-memory channel. Drain it between requests.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: RefCell<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all pending notices, leaving the board empty.
    pub fn drain(&self) -> Vec<Notice> {
        self.pending.borrow_mut().drain(..).collect()
    }
}

impl NoticeChannel for NoticeBoard {
    fn report(&self, code: &str, message: &str) {
        self.pending.borrow_mut().push(Notice {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_starts_empty() {
        let board = NoticeBoard::new();
        assert!(!board.has_pending());
    }

    #[test]
    fn report_queues_notice() {
        let board = NoticeBoard::new();
        board.report("invalid-email", "Please enter a valid email address.");
        assert!(board.has_pending());
    }

    #[test]
    fn drain_empties_board() {
        let board = NoticeBoard::new();
        board.report("a", "first");
        board.report("b", "second");
        let drained = board.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].code, "a");
        assert!(!board.has_pending());
    }
}
