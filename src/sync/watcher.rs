//! Edge-triggered change detection.
//!
//! Every relevant mutation batch triggers a state recompute, but only
//! transitions are worth a report: the page fires attribute mutations far
//! more often than the state actually flips, and the companion only needs
//! to hear about flips.

// ============================================================================
// ChangeWatcher
// ============================================================================

/// Suppresses repeat observations of the same state.
///
/// The "previous" value seeds as muted/off: initial call state is assumed
/// muted unless observed otherwise, which also resolves the
/// attribute-removal case where no prior value was ever recorded. The
/// initial state report a companion sees comes from the connection resync,
/// not from here.
#[derive(Debug)]
pub struct ChangeWatcher {
    /// The most recently observed state.
    last: bool,
}

impl Default for ChangeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeWatcher {
    /// Creates a watcher seeded with the muted/off default.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { last: true }
    }

    /// Records an observation, returning it only if it is a transition.
    #[inline]
    pub fn observe(&mut self, muted: bool) -> Option<bool> {
        if muted == self.last {
            return None;
        }
        self.last = muted;
        Some(muted)
    }

    /// Returns the most recently observed state.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> bool {
        self.last
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_repeats_are_suppressed() {
        let mut watcher = ChangeWatcher::new();

        let observed = [true, true, false, false, true];
        let emitted: Vec<bool> = observed
            .into_iter()
            .filter_map(|muted| watcher.observe(muted))
            .collect();

        assert_eq!(emitted, vec![false, true]);
    }

    #[test]
    fn test_initial_muted_observation_is_not_a_transition() {
        let mut watcher = ChangeWatcher::new();
        assert_eq!(watcher.observe(true), None);
    }

    #[test]
    fn test_initial_unmuted_observation_is_a_transition() {
        let mut watcher = ChangeWatcher::new();
        assert_eq!(watcher.observe(false), Some(false));
    }

    #[test]
    fn test_last_tracks_observations() {
        let mut watcher = ChangeWatcher::new();
        assert!(watcher.last());

        watcher.observe(false);
        assert!(!watcher.last());
    }

    proptest! {
        /// Emitted reports are exactly the transitions of the observed
        /// sequence, with the sequence implicitly starting muted.
        #[test]
        fn prop_emits_transitions_only(observed in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut watcher = ChangeWatcher::new();
            let emitted: Vec<bool> = observed
                .iter()
                .filter_map(|&muted| watcher.observe(muted))
                .collect();

            let mut expected = Vec::new();
            let mut prev = true;
            for &muted in &observed {
                if muted != prev {
                    expected.push(muted);
                    prev = muted;
                }
            }

            prop_assert_eq!(emitted, expected);
        }
    }
}
