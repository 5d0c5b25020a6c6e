//! # vouch-stats
//!
//! Turns a stream of accepted scores into bounded trust signals.
//!
//! - [`ema`]: fast/slow EMAs, volatility, burst and negative pressure, loyalty, arrival timing
//! - [`confidence`]: diversity ratio, cold-start confidence, quality
//! - [`risk`]: six weighted risk signals
//! - [`tier`]: trust tier state machine with promotion vesting

pub mod confidence;
pub mod ema;
pub mod risk;
pub mod tier;

pub use confidence::{confidence, diversity_ratio, quality, ConfidenceInputs};
pub use ema::{RepeatKind, Sample, StreamingStats};
pub use risk::{risk_score, RiskInputs, RiskSignals};
pub use tier::{TierMachine, TierMetrics};
