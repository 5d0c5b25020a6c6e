//! Structured log events for tier movement, rejected input and config changes.

use vouch_core::models::{EntityId, TrustTier};
use vouch_core::VouchError;

pub fn tier_promoted(entity: EntityId, from: TrustTier, to: TrustTier) {
    tracing::info!(
        event = "tier_promoted",
        entity = %entity,
        from = %from,
        to = %to,
        "tier promoted"
    );
}

pub fn tier_demoted(entity: EntityId, from: TrustTier, to: TrustTier) {
    tracing::info!(
        event = "tier_demoted",
        entity = %entity,
        from = %from,
        to = %to,
        "tier demoted"
    );
}

pub fn input_rejected(entity: EntityId, operation: &str, error: &VouchError) {
    tracing::warn!(
        event = "input_rejected",
        entity = %entity,
        operation = %operation,
        error = %error,
        "input rejected"
    );
}

pub fn config_updated() {
    tracing::info!(event = "config_updated", "config updated");
}

pub fn config_rejected(error: &VouchError) {
    tracing::warn!(event = "config_rejected", error = %error, "config update rejected");
}
