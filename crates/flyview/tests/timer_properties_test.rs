//! Property tests for the timer registry through the interactor.

use flyview::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_repeating_timer_keeps_duration(duration in 1u64..1_000_000) {
        let mut interactor = Interactor::headless();
        let id = interactor.create_repeating_timer(duration);
        prop_assert!(id.is_valid());
        prop_assert_eq!(interactor.timer_duration(id), duration);
        prop_assert!(!interactor.is_one_shot_timer(id));
    }

    #[test]
    fn test_unissued_ids_are_unknown(raw in 0u32..10_000, created in 0usize..8) {
        let mut interactor = Interactor::headless();
        let issued: Vec<TimerId> = (0..created)
            .map(|_| interactor.create_one_shot_timer(5))
            .collect();
        let id = TimerId(raw);
        prop_assume!(!issued.contains(&id));

        prop_assert_eq!(interactor.timer_duration(id), 0);
        prop_assert!(!interactor.is_one_shot_timer(id));
        prop_assert!(!interactor.reset_timer(id));
        prop_assert!(!interactor.destroy_timer(id));
    }

    #[test]
    fn test_reset_preserves_kind_and_duration(duration in 1u64..10_000, one_shot in any::<bool>()) {
        let mut interactor = Interactor::headless();
        let id = if one_shot {
            interactor.create_one_shot_timer(duration)
        } else {
            interactor.create_repeating_timer(duration)
        };
        prop_assert!(interactor.reset_timer(id));
        prop_assert_eq!(interactor.timer_duration(id), duration);
        prop_assert_eq!(interactor.is_one_shot_timer(id), one_shot);
    }

    #[test]
    fn test_translate_finds_owner_among_mixed_timers(
        kinds in proptest::collection::vec(any::<bool>(), 1..16),
    ) {
        let mut interactor = Interactor::headless();
        let ids: Vec<TimerId> = kinds
            .iter()
            .map(|&one_shot| {
                if one_shot {
                    interactor.create_one_shot_timer(10)
                } else {
                    interactor.create_repeating_timer(10)
                }
            })
            .collect();

        let timers = interactor.timers();
        for id in ids {
            let handle = timers.record(id).unwrap().platform_handle;
            prop_assert_eq!(timers.translate_platform_handle(handle), id);
        }
        prop_assert_eq!(
            timers.translate_platform_handle(PlatformTimerHandle(u64::MAX)),
            TimerId::NONE
        );
    }
}

#[test]
fn test_destroy_twice_returns_true_then_false() {
    let mut interactor = Interactor::headless();
    let id = interactor.create_repeating_timer(20);
    assert!(interactor.destroy_timer(id));
    assert!(!interactor.destroy_timer(id));
}

#[test]
fn test_failed_reset_invalidates_id() {
    let mut interactor = Interactor::headless();
    let id = interactor.create_one_shot_timer(20);
    interactor.timers_mut().platform_mut().set_fail_next_create(true);

    assert!(!interactor.reset_timer(id));
    assert_eq!(interactor.timer_duration(id), 0);
    assert!(!interactor.is_one_shot_timer(id));
    assert!(!interactor.destroy_timer(id));
    assert_eq!(interactor.timers().platform().armed_count(), 0);
}

#[test]
fn test_refused_create_returns_none() {
    let mut interactor = Interactor::headless();
    interactor.timers_mut().platform_mut().set_fail_next_create(true);
    assert_eq!(interactor.create_repeating_timer(20), TimerId::NONE);
    assert!(interactor.timers().is_empty());
}

#[test]
fn test_legacy_surface() {
    let mut interactor = Interactor::headless();

    // Update never creates anything
    assert_eq!(
        interactor.create_timer(LegacyTimerRequest::Update),
        TimerId::LEGACY_SUCCESS
    );
    assert!(interactor.timers().is_empty());

    let id = interactor.create_timer(LegacyTimerRequest::First);
    assert_eq!(id, TimerId(1));
    assert!(!interactor.is_one_shot_timer(id));
    assert_eq!(interactor.timer_duration(id), 10);

    // Modern timer advances the counter; legacy destroy now targets it
    let modern = interactor.create_one_shot_timer(5);
    assert!(interactor.destroy_current_timer());
    assert_eq!(interactor.timer_duration(modern), 0);
    assert_eq!(interactor.timer_duration(id), 10);
    assert!(!interactor.destroy_current_timer());
}
