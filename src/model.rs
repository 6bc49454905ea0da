//! Bounded logistic growth model.

/// Lowest growth rate the model can return.
pub const GROWTH_FLOOR: f64 = 0.1;
/// Highest growth rate the model can return.
pub const GROWTH_CEILING: f64 = 5.0;
/// Intrinsic growth coefficient.
pub const GROWTH_R: f64 = 1.0 / 400.0;

/// Compute the growth rate of `n_pops` pops living on a planet with the given `capacity`.
///
/// The raw logistic rate is clamped to `[GROWTH_FLOOR, GROWTH_CEILING]`.
/// A non-positive population or capacity yields `GROWTH_FLOOR`.
pub fn growth_rate(n_pops: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 || n_pops <= 0.0 {
        return GROWTH_FLOOR;
    }

    let rate = GROWTH_R * n_pops * (1.0 - n_pops / capacity);

    rate.max(GROWTH_FLOOR).min(GROWTH_CEILING)
}
