use proptest::prelude::*;
use vouch_core::config::{ConfidenceConfig, RiskConfig, StatsConfig, TierConfig};
use vouch_core::constants::{ARRIVAL_MAX, EMA_SCALE, QUALITY_MAX};
use vouch_stats::{
    confidence, diversity_ratio, quality, risk_score, ConfidenceInputs, RepeatKind, RiskInputs,
    Sample, StreamingStats, TierMachine, TierMetrics,
};

fn repeat_kind() -> impl Strategy<Value = RepeatKind> {
    prop_oneof![
        Just(RepeatKind::Fresh),
        Just(RepeatKind::Rapid),
        Just(RepeatKind::Returning),
    ]
}

fn samples() -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec(
        (0u8..=100, prop::option::of(0u64..10_000_000), repeat_kind())
            .prop_map(|(score, gap, repeat)| Sample { score, gap, repeat }),
        1..200,
    )
}

// ── Fast EMA always moves toward the latest score ───────────────────────

proptest! {
    #[test]
    fn fast_ema_moves_toward_each_score(stream in samples()) {
        let config = StatsConfig::default();
        let mut stats = StreamingStats::new();
        for sample in stream {
            let before = stats.ema_fast;
            let target = u32::from(sample.score) * 100;
            stats.update(sample, &config);
            prop_assert!(before.abs_diff(target) > stats.ema_fast.abs_diff(target) || before == target);
            prop_assert!(stats.ema_fast.abs_diff(target) <= before.abs_diff(target));
        }
    }
}

// ── Every statistic stays inside its range ──────────────────────────────

proptest! {
    #[test]
    fn statistics_stay_bounded(stream in samples()) {
        let config = StatsConfig::default();
        let mut stats = StreamingStats::new();
        for sample in stream {
            stats.update(sample, &config);
            prop_assert!(stats.ema_fast <= EMA_SCALE);
            prop_assert!(stats.ema_slow <= EMA_SCALE);
            prop_assert!(stats.ema_volatility <= EMA_SCALE);
            prop_assert!(stats.ema_arrival <= ARRIVAL_MAX);
            prop_assert!(stats.max_drawdown <= stats.peak_ema);
        }
    }
}

// ── Derived scores are clamped for all inputs ───────────────────────────

proptest! {
    #[test]
    fn derived_scores_are_clamped(
        count in any::<u32>(),
        estimate in any::<u32>(),
        epochs in any::<u32>(),
        loyalty in any::<u8>(),
        fast in 0u32..=EMA_SCALE,
        slow in 0u32..=EMA_SCALE,
        burst in any::<u8>(),
        neg in any::<u8>(),
        volatility in 0u32..=EMA_SCALE,
        arrival in 0u32..=ARRIVAL_MAX,
    ) {
        let diversity = diversity_ratio(estimate, count);
        let conf = confidence(
            &ConfidenceInputs { feedback_count: count, diversity, epoch_count: epochs, loyalty_score: loyalty },
            &ConfidenceConfig::default(),
        );
        prop_assert!(conf <= 100);
        prop_assert!(quality(fast, slow, conf, &ConfidenceConfig::default()) <= QUALITY_MAX);
        let risk = risk_score(
            &RiskInputs {
                feedback_count: count,
                diversity,
                burst_pressure: burst,
                neg_pressure: neg,
                ema_fast: fast,
                ema_slow: slow,
                ema_volatility: volatility,
                ema_arrival: arrival,
                arrival_seeded: true,
            },
            &RiskConfig::default(),
            5,
        );
        prop_assert!(risk <= 100);
    }
}

// ── Promotion never beats the vesting clock ─────────────────────────────

proptest! {
    #[test]
    fn no_promotion_before_vesting(
        vesting in 1u32..12,
        steps in prop::collection::vec((0u32..=10_000, 0u8..=100, 0u8..=100, any::<u8>(), 0u64..3), 1..80),
    ) {
        let config = TierConfig { vesting_epochs: vesting, ..TierConfig::default() };
        let mut machine = TierMachine::new();
        let mut epoch = 0u64;
        for (quality, risk, confidence, loyalty_score, advance) in steps {
            epoch += advance;
            let before = machine;
            let metrics = TierMetrics { quality, risk, confidence, loyalty_score };
            machine.evaluate(&metrics, epoch, &config);
            if machine.effective() > before.effective() {
                let opened = before.candidate().map(|_| before.candidate_epoch()).unwrap_or(epoch);
                prop_assert!(epoch - opened >= u64::from(vesting));
                prop_assert!(before.candidate() >= Some(machine.effective()));
            }
        }
    }
}
