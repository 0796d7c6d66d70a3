//! # Guidance module
//!
//! Guidance is the target-selection capability consumed by the navigation
//! loop: something which, once per cycle, may produce a new target to
//! pursue. Mission logic (waypoint sequencing, loitering, search patterns)
//! lives behind this trait and is not part of the control core.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;

// Internal
use boat_if::nav::Target;
use util::session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of navigation targets, polled once per cycle.
pub trait TargetSelector {
    /// Check if a new target should be pursued.
    ///
    /// Returns `None` to keep the current target.
    fn check_new_target(&mut self) -> Option<Target>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A target released at a fixed session-elapsed time.
pub struct TimedTarget {
    /// Time at which the target becomes the one to pursue.
    ///
    /// Units: seconds, session elapsed
    pub release_time_s: f64,

    /// The target itself.
    pub target: Target
}

/// A queue of targets released at fixed times, oldest first.
///
/// The simplest useful behaviour: a pre-planned sequence of legs. Used by
/// the simulation binary; the flight configuration receives targets over the
/// network instead.
pub struct TimedTargets {
    entries: VecDeque<TimedTarget>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TimedTargets {
    /// Create a new queue from entries in ascending release-time order.
    pub fn new(entries: Vec<TimedTarget>) -> Self {
        Self {
            entries: entries.into()
        }
    }

    /// Number of targets not yet released.
    pub fn num_remaining(&self) -> usize {
        self.entries.len()
    }

    /// Check for a new target at the given session-elapsed time.
    ///
    /// At most one target is released per call, oldest first, so a slow
    /// caller cannot silently skip a leg.
    pub fn check_new_target_at(&mut self, time_s: f64) -> Option<Target> {
        match self.entries.front() {
            Some(entry) if entry.release_time_s <= time_s => {
                self.entries.pop_front().map(|e| e.target)
            }
            _ => None
        }
    }
}

impl TargetSelector for TimedTargets {
    fn check_new_target(&mut self) -> Option<Target> {
        self.check_new_target_at(session::get_elapsed_seconds())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use boat_if::nav::Pos;

    fn queue() -> TimedTargets {
        TimedTargets::new(vec![
            TimedTarget {
                release_time_s: 1.0,
                target: Target::Bearing { bearing_deg: 90.0 }
            },
            TimedTarget {
                release_time_s: 5.0,
                target: Target::Waypoint {
                    pos: Pos { lat_deg: 0.1, lon_deg: 0.0 }
                }
            }
        ])
    }

    #[test]
    fn test_release_in_order() {
        let mut targets = queue();

        assert_eq!(targets.check_new_target_at(0.5), None);
        assert_eq!(
            targets.check_new_target_at(1.5),
            Some(Target::Bearing { bearing_deg: 90.0 })
        );
        assert_eq!(targets.check_new_target_at(2.0), None);
        assert!(targets.check_new_target_at(6.0).is_some());
        assert_eq!(targets.num_remaining(), 0);
        assert_eq!(targets.check_new_target_at(100.0), None);
    }

    #[test]
    fn test_one_release_per_call() {
        let mut targets = queue();

        // Both release times have passed, but the legs still come out one
        // per call
        assert!(targets.check_new_target_at(10.0).is_some());
        assert_eq!(targets.num_remaining(), 1);
        assert!(targets.check_new_target_at(10.0).is_some());
        assert_eq!(targets.num_remaining(), 0);
    }
}
