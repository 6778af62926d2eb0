//! Terminal mode guard.

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode},
};
use std::io::{self, Write};
use tracing::warn;

/// Puts the terminal back to normal when dropped, including on early returns.
///
/// Create it right after `enable_raw_mode()` succeeds.
pub struct TerminalGuard<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Arms the guard over `out`.
    pub fn new(out: W) -> Self {
        Self { out, active: true }
    }

    /// Switches to the alternate screen and turns on mouse reporting.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.out, EnterAlternateScreen, EnableMouseCapture)
    }

    /// Leaves raw mode and the alternate screen. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAVE_ALTERNATE_SCREEN: &str = "\x1b[?1049l";

    /// Writer whose first write fails, like a closed terminal.
    struct FailsOnce<'a> {
        out: &'a mut Vec<u8>,
        failed: bool,
    }

    impl Write for FailsOnce<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::other("terminal closed"));
            }
            self.out.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_drop_restores_after_enter() {
        let mut out = Vec::new();
        {
            let mut guard = TerminalGuard::new(&mut out);
            guard.enter().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?1049h"));
        assert!(text.contains(LEAVE_ALTERNATE_SCREEN));
    }

    #[test]
    fn test_failed_enter_still_restores() {
        let mut out = Vec::new();
        {
            let mut guard = TerminalGuard::new(FailsOnce {
                out: &mut out,
                failed: false,
            });
            assert!(guard.enter().is_err());
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(LEAVE_ALTERNATE_SCREEN));
    }

    #[test]
    fn test_restore_runs_once() {
        let mut out = Vec::new();
        {
            let mut guard = TerminalGuard::new(&mut out);
            guard.restore().unwrap();
            guard.restore().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(LEAVE_ALTERNATE_SCREEN).count(), 1);
    }
}
