//! Tests for calamity incident status triage
//! Verifies the guarded status transition table

use proptest::prelude::*;
use shared::IncidentStatus;

const ALL_STATUSES: [IncidentStatus; 4] = [
    IncidentStatus::Pending,
    IncidentStatus::Verified,
    IncidentStatus::Resolved,
    IncidentStatus::Rejected,
];

// =============================================================================
// Transition table tests
// =============================================================================

mod transitions {
    use super::*;

    #[test]
    fn pending_can_be_verified_or_rejected() {
        assert!(IncidentStatus::Pending.can_transition_to(IncidentStatus::Verified));
        assert!(IncidentStatus::Pending.can_transition_to(IncidentStatus::Rejected));
        assert!(!IncidentStatus::Pending.can_transition_to(IncidentStatus::Resolved));
    }

    #[test]
    fn verified_can_be_resolved_or_rejected() {
        assert!(IncidentStatus::Verified.can_transition_to(IncidentStatus::Resolved));
        assert!(IncidentStatus::Verified.can_transition_to(IncidentStatus::Rejected));
        assert!(!IncidentStatus::Verified.can_transition_to(IncidentStatus::Pending));
    }

    #[test]
    fn resolved_is_terminal() {
        for next in ALL_STATUSES {
            assert!(!IncidentStatus::Resolved.can_transition_to(next));
        }
    }

    #[test]
    fn rejected_is_terminal() {
        for next in ALL_STATUSES {
            assert!(!IncidentStatus::Rejected.can_transition_to(next));
        }
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in ALL_STATUSES {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for status in ALL_STATUSES {
            assert_eq!(IncidentStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(IncidentStatus::from_str("unknown"), None);
    }
}

// =============================================================================
// Property tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = IncidentStatus> {
        prop_oneof![
            Just(IncidentStatus::Pending),
            Just(IncidentStatus::Verified),
            Just(IncidentStatus::Resolved),
            Just(IncidentStatus::Rejected),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any chain of allowed transitions ends within two steps, since
        /// pending -> verified -> resolved/rejected is the longest path
        #[test]
        fn prop_triage_always_terminates(
            start in status_strategy(),
            choices in prop::collection::vec(status_strategy(), 0..10)
        ) {
            let mut current = start;
            let mut steps = 0;
            for next in choices {
                if current.can_transition_to(next) {
                    current = next;
                    steps += 1;
                }
            }
            prop_assert!(steps <= 2);
        }

        /// Terminal statuses admit no further transition
        #[test]
        fn prop_terminal_statuses_frozen(next in status_strategy()) {
            prop_assert!(!IncidentStatus::Resolved.can_transition_to(next));
            prop_assert!(!IncidentStatus::Rejected.can_transition_to(next));
        }
    }
}
