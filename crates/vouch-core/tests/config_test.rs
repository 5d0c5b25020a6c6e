use vouch_core::config::*;
use vouch_core::VouchError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = VouchConfig::from_toml("").unwrap();

    // Ring defaults
    assert_eq!(config.ring.mrt_min_secs, 3_600);
    assert_eq!(config.ring.mrt_max_bypass, 10);

    // Stats defaults
    assert_eq!(config.stats.alpha_fast_bps, 2_000);
    assert_eq!(config.stats.alpha_slow_bps, 500);
    assert_eq!(config.stats.burst_decay_pct, 90);

    // Tier defaults
    assert_eq!(config.tiers.vesting_epochs, 8);
    assert_eq!(config.tiers.epoch_length_secs, 86_400);
    assert_eq!(config.tiers.platinum.min_quality, 8_500);

    // Risk weights sum to 100
    assert_eq!(config.risk.weight_sum(), 100);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[ring]
mrt_min_secs = 60

[tiers]
vesting_epochs = 3
epoch_length_secs = 10
"#;
    let config = VouchConfig::from_toml(toml).unwrap();
    assert_eq!(config.ring.mrt_min_secs, 60);
    assert_eq!(config.tiers.vesting_epochs, 3);
    assert_eq!(config.tiers.epoch_length_secs, 10);
    // Non-overridden fields keep defaults
    assert_eq!(config.ring.mrt_max_bypass, 10);
    assert_eq!(config.tiers.gold.max_risk, 40);
}

#[test]
fn config_serde_roundtrip() {
    let config = VouchConfig::default();
    let toml_str = config.to_toml().unwrap();
    let roundtripped = VouchConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped, config);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = VouchConfig::from_toml("[ring\nmrt_min_secs = 1").unwrap_err();
    assert!(matches!(err, VouchError::Config(_)));
}

#[test]
fn bypass_cap_above_capacity_is_rejected() {
    let err = VouchConfig::from_toml("[ring]\nmrt_max_bypass = 11\n").unwrap_err();
    assert!(matches!(
        err,
        VouchError::ConfigBounds { field: "ring.mrt_max_bypass", .. }
    ));
}

#[test]
fn zero_alpha_is_rejected() {
    let mut config = VouchConfig::default();
    config.stats.alpha_fast_bps = 0;
    assert!(matches!(
        config.validate(),
        Err(VouchError::ConfigBounds { field: "stats.alpha_fast_bps", .. })
    ));
}

#[test]
fn slow_alpha_above_fast_alpha_is_rejected() {
    let mut config = VouchConfig::default();
    config.stats.alpha_slow_bps = 5_000;
    assert!(config.validate().is_err());
}

#[test]
fn risk_weights_must_sum_to_one_hundred() {
    let mut config = VouchConfig::default();
    config.risk.sybil_weight = 31;
    assert!(matches!(
        config.validate(),
        Err(VouchError::ConfigBounds { field: "risk.weights", .. })
    ));
}

#[test]
fn tier_ladder_must_get_strictly_harder() {
    let mut config = VouchConfig::default();
    config.tiers.gold.min_quality = config.tiers.silver.min_quality;
    assert!(config.validate().is_err());

    let mut config = VouchConfig::default();
    config.tiers.platinum.max_risk = config.tiers.gold.max_risk;
    assert!(config.validate().is_err());

    let mut config = VouchConfig::default();
    config.tiers.platinum.min_quality = 10_001;
    assert!(config.validate().is_err());
}

#[test]
fn vesting_bounds_are_enforced() {
    let mut config = VouchConfig::default();
    config.tiers.vesting_epochs = 0;
    assert!(config.validate().is_err());
    config.tiers.vesting_epochs = 1_025;
    assert!(config.validate().is_err());
    config.tiers.vesting_epochs = 1;
    assert!(config.validate().is_ok());
}
