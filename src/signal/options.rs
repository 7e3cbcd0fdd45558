//! signal::options — configuration carried by every signal.
//!
//! Purpose
//! -------
//! Collect the few behavioral knobs of a [`Signal`](crate::signal::Signal)
//! in one plain data carrier so call sites pass explicit options instead of
//! ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - [`RebinPolicy`] decides what `rebin` does with a target shape that does
//!   not divide the current shape.
//! - `default_signal_dimension` decides the navigation/signal partition when
//!   axis specs carry no explicit flags.
//! - `squeeze_on_load` controls the squeeze at the end of construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are copied into every derived signal (split segments, reduced
//!   copies, decomposition exports) unchanged.
//! - `default_signal_dimension` larger than the dimensionality is clamped by
//!   the axes manager, so no validation is needed here.
use serde::{Deserialize, Serialize};

/// What `rebin` does when a target extent does not divide the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebinPolicy {
    /// Reject with `SignalError::RebinNotDivisor` before touching state.
    #[default]
    Strict,
    /// Drop trailing elements until every dimension divides, then rebin.
    Truncate,
}

/// SignalOptions — per-signal configuration.
///
/// Fields
/// ------
/// - `rebin_policy`: [`RebinPolicy`], default `Strict`.
/// - `default_signal_dimension`: `usize`, default 1.
/// - `squeeze_on_load`: `bool`, default `true`. Setting it to `false` keeps
///   size-1 dimensions of an incoming dictionary; intended only for
///   round-tripping data that is already squeezed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalOptions {
    pub rebin_policy: RebinPolicy,
    pub default_signal_dimension: usize,
    pub squeeze_on_load: bool,
}

impl SignalOptions {
    pub fn new(
        rebin_policy: RebinPolicy, default_signal_dimension: usize, squeeze_on_load: bool,
    ) -> SignalOptions {
        SignalOptions { rebin_policy, default_signal_dimension, squeeze_on_load }
    }
}

impl Default for SignalOptions {
    fn default() -> Self {
        SignalOptions {
            rebin_policy: RebinPolicy::Strict,
            default_signal_dimension: 1,
            squeeze_on_load: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults match the documented values.
    //
    // Given
    // -----
    // - `SignalOptions::default()`.
    //
    // Expect
    // ------
    // - Strict rebin, one signal axis, squeeze on load.
    fn default_matches_documented_values() {
        let opts = SignalOptions::default();

        assert_eq!(opts.rebin_policy, RebinPolicy::Strict);
        assert_eq!(opts.default_signal_dimension, 1);
        assert!(opts.squeeze_on_load);
    }

    #[test]
    // Purpose
    // -------
    // `new` preserves its inputs.
    //
    // Given
    // -----
    // - Truncate, 2 signal axes, no squeeze.
    //
    // Expect
    // ------
    // - Same values in each field.
    fn new_preserves_fields() {
        let opts = SignalOptions::new(RebinPolicy::Truncate, 2, false);

        assert_eq!(opts.rebin_policy, RebinPolicy::Truncate);
        assert_eq!(opts.default_signal_dimension, 2);
        assert!(!opts.squeeze_on_load);
    }
}
