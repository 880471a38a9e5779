//! Change detection for per-frame signals.
//!
//! Vision signals are recomputed every frame; actuators should only hear
//! about a value when it differs from the one last acted upon.

/// Remembers the last emitted value and reports only changes.
///
/// # Example
/// ```rust
/// use landmark_signal::Debouncer;
///
/// let mut d = Debouncer::new();
/// assert!(d.update(3));
/// assert!(!d.update(3));
/// d.reset();
/// assert!(d.update(3));   // unknown → 3 is a change again
/// ```
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    last: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Debouncer { last: None }
    }
}

impl<T: PartialEq> Debouncer<T> {
    /// A debouncer with no remembered value.
    pub fn new() -> Self { Self::default() }

    /// Record `value`; `true` when it differs from the remembered one.
    pub fn update(&mut self, value: T) -> bool {
        if self.last.as_ref() == Some(&value) {
            return false;
        }
        self.last = Some(value);
        true
    }

    /// Forget the remembered value so the next update always reports.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
