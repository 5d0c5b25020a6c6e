use proptest::prelude::*;
use vouch_core::fixed::*;

// ── Rounding stays within half a unit of the exact quotient ─────────────

proptest! {
    #[test]
    fn div_round_half_up_is_nearest(num in 0u64..1_000_000_000, den in 1u64..1_000_000) {
        let q = div_round_half_up(num, den);
        let exact = num as f64 / den as f64;
        prop_assert!((q as f64 - exact).abs() <= 0.5 + 1e-9, "{} / {} -> {}", num, den, q);
    }
}

// ── EMA steps never overshoot and always make progress ──────────────────

proptest! {
    #[test]
    fn ema_step_moves_toward_target(
        old in 0u32..=10_000,
        target in 0u32..=10_000,
        alpha in 1u32..=10_000,
    ) {
        let next = ema_step(old, target, alpha);
        if old == target {
            prop_assert_eq!(next, old);
        } else if target > old {
            prop_assert!(next > old && next <= target);
        } else {
            prop_assert!(next < old && next >= target);
        }
    }
}

// ── Averages of scores are scores ───────────────────────────────────────

proptest! {
    #[test]
    fn average_is_bounded_by_extremes(values in prop::collection::vec(0u8..=100, 1..50)) {
        let avg = avg_round_half_up(&values).unwrap();
        let min = *values.iter().min().unwrap();
        let max = *values.iter().max().unwrap();
        prop_assert!(avg >= min && avg <= max);
    }
}

// ── log2 is monotone ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn log2_is_monotone(a in 1u64..u64::MAX, b in 1u64..u64::MAX) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(log2_fixed(lo) <= log2_fixed(hi));
    }
}
