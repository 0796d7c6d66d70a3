//! # Telecommand Processor
//!
//! Dispatches recieved telecommands into the data store.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use boat_if::tc::Tc;
use log::{info, warn};

use crate::data_store::{DataStore, SafeModeCause};

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Execute the given telecommand against the data store.
pub fn exec(ds: &mut DataStore, tc: &Tc) {
    match tc {
        Tc::SetTarget(target) => {
            info!("New target commanded: {:?}", target);
            ds.new_target = Some(*target);
        }
        Tc::MakeSafe => {
            ds.make_safe(SafeModeCause::MakeSafeTc);
        }
        Tc::MakeUnsafe => {
            if ds.make_unsafe(SafeModeCause::MakeSafeTc).is_err() {
                warn!(
                    "Cannot make unsafe, safe mode cause is {:?}",
                    ds.safe_cause
                );
            }
        }
        Tc::Shutdown => {
            info!("Shutdown TC recieved");
            ds.shutdown_requested = true;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use boat_if::nav::Target;

    #[test]
    fn test_set_target() {
        let mut ds = DataStore::default();

        exec(
            &mut ds,
            &Tc::SetTarget(Target::Bearing { bearing_deg: 45.0 })
        );

        assert_eq!(ds.new_target, Some(Target::Bearing { bearing_deg: 45.0 }));
    }

    #[test]
    fn test_safe_mode_round_trip() {
        let mut ds = DataStore::default();

        exec(&mut ds, &Tc::MakeSafe);
        assert!(ds.safe);
        assert_eq!(ds.safe_cause, Some(SafeModeCause::MakeSafeTc));

        exec(&mut ds, &Tc::MakeUnsafe);
        assert!(!ds.safe);
        assert_eq!(ds.safe_cause, None);
    }

    #[test]
    fn test_make_unsafe_requires_matching_cause() {
        let mut ds = DataStore::default();

        ds.make_safe(SafeModeCause::TcClientNotConnected);

        // The MakeUnsafe TC clears only TC-commanded safe modes
        exec(&mut ds, &Tc::MakeUnsafe);
        assert!(ds.safe);
    }

    #[test]
    fn test_shutdown() {
        let mut ds = DataStore::default();

        exec(&mut ds, &Tc::Shutdown);
        assert!(ds.shutdown_requested);
    }
}
