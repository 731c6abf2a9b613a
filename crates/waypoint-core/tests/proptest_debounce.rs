#![forbid(unsafe_code)]

//! Property tests for [`Debouncer`] over arbitrary trigger streams.

use std::time::Duration;

use proptest::prelude::*;
use waypoint_core::Debouncer;

proptest! {
    /// A burst whose gaps are all shorter than the delay fires exactly once,
    /// one delay after the last trigger.
    #[test]
    fn burst_fires_once_after_last_trigger(
        delay_ms in 1u64..500,
        gaps in prop::collection::vec(0u64..1000, 1..50),
    ) {
        let delay = Duration::from_millis(delay_ms);
        let mut debouncer = Debouncer::new(delay);
        let mut now = Duration::ZERO;
        let mut fired = 0;
        for gap in &gaps {
            let gap = Duration::from_millis(gap % delay_ms);
            now += gap;
            if debouncer.poll(now) {
                fired += 1;
            }
            debouncer.trigger(now);
        }
        prop_assert_eq!(fired, 0);
        prop_assert_eq!(debouncer.absorbed() as usize, gaps.len());
        prop_assert_eq!(debouncer.deadline(), Some(now + delay));

        prop_assert!(!debouncer.poll(now + delay - Duration::from_millis(1)));
        prop_assert!(debouncer.poll(now + delay));
        prop_assert!(!debouncer.poll(now + delay * 10));
    }

    /// Cancelling drops any pending firing regardless of history.
    #[test]
    fn cancel_always_clears(
        triggers in prop::collection::vec(0u64..10_000, 0..20),
        later in 0u64..100_000,
    ) {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        for t in triggers {
            debouncer.trigger(Duration::from_millis(t));
        }
        debouncer.cancel();
        prop_assert!(!debouncer.is_pending());
        prop_assert_eq!(debouncer.absorbed(), 0);
        prop_assert!(!debouncer.poll(Duration::from_millis(later)));
    }
}
