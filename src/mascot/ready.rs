use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
}

/// Shared, one-way `Loading -> Ready` flag.
///
/// Clones observe the same state. Once ready, it stays ready.
#[derive(Debug, Clone, Default)]
pub struct ReadySignal {
    state: Rc<Cell<LoadState>>,
}

impl ReadySignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.get() == LoadState::Ready
    }

    /// Returns `true` only for the call that performs the transition.
    pub fn mark_ready(&self) -> bool {
        if self.is_ready() {
            log::debug!("Ready signal already set, ignoring");
            return false;
        }
        self.state.set(LoadState::Ready);
        log::info!("Mascot ready");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_happens_once() {
        let signal = ReadySignal::new();
        let observer = signal.clone();
        assert_eq!(observer.state(), LoadState::Loading);

        assert!(signal.mark_ready());
        assert!(!signal.mark_ready());
        assert!(!observer.mark_ready());
        assert_eq!(observer.state(), LoadState::Ready);
    }
}
