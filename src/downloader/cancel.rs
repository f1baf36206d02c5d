//! Cooperative cancellation flag shared between the UI and the worker

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared boolean: written by the UI thread, read from the engine callback path.
///
/// Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_set());
        token.set();
        assert!(token.is_set());
        token.clear();
        assert!(!token.is_set());
    }

    #[test]
    fn test_clones_share_flag() {
        let token = CancellationToken::new();
        let reader = token.clone();
        token.set();
        assert!(reader.is_set());
    }

    #[test]
    fn test_visible_across_threads() {
        let token = CancellationToken::new();
        let writer = token.clone();
        std::thread::spawn(move || writer.set())
            .join()
            .expect("writer thread");
        assert!(token.is_set());
    }
}
