//! Hold-to-fire power.

use salvo_core::constants::{MAX_CHARGE_MILLIS, MAX_POWER};

/// Power after holding fire for `elapsed_millis`: linear from 0 up to
/// `MAX_POWER` at `MAX_CHARGE_MILLIS`, flat after that.
pub fn charge_power(elapsed_millis: u64) -> u32 {
    let elapsed = elapsed_millis.min(MAX_CHARGE_MILLIS);
    (elapsed * MAX_POWER as u64 / MAX_CHARGE_MILLIS) as u32
}
