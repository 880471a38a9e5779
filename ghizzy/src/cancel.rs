//! Cooperative cancellation for the control loops.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Shared stop flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self { Self::default() }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// True for the lines that request a stop.
pub fn is_quit_line(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit")
}

/// Watch `input` on a background thread and cancel `token` when a quit line
/// arrives. End of input stops the watcher without cancelling.
pub fn spawn_quit_watcher<R>(input: R, token: CancelToken) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(l) if is_quit_line(&l) => {
                    tracing::info!("quit requested");
                    token.cancel();
                    return;
                }
                Ok(_)  => {}
                Err(_) => return,
            }
        }
    })
}

/// [`spawn_quit_watcher`] on the process's stdin.
pub fn spawn_quit_listener(token: CancelToken) -> JoinHandle<()> {
    spawn_quit_watcher(io::BufReader::new(io::stdin()), token)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn clones_share_the_flag() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn quit_lines() {
        assert!(is_quit_line("q"));
        assert!(is_quit_line(" Quit \n"));
        assert!(!is_quit_line("quite"));
        assert!(!is_quit_line(""));
    }

    #[test]
    fn watcher_cancels_on_q() {
        let token = CancelToken::new();
        let input = Cursor::new(b"hello\nq\nignored\n".to_vec());
        spawn_quit_watcher(input, token.clone()).join().unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn watcher_eof_does_not_cancel() {
        let token = CancelToken::new();
        let input = Cursor::new(b"1\n2\n".to_vec());
        spawn_quit_watcher(input, token.clone()).join().unwrap();
        assert!(!token.is_cancelled());
    }
}
