// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Default weight scale used for template selection.

/// Weight applied to templates that do not declare one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Largest weight a template may carry after normalization.
pub const MAX_WEIGHT: f64 = 1_000_000.0;

/// Maps a raw weight onto the selection scale.
///
/// `NaN` and negative weights disable the template (`0.0`); weights above
/// [`MAX_WEIGHT`], including positive infinity, saturate. The mapping is
/// idempotent.
///
/// # Examples
///
/// ```
/// use tplgen::{MAX_WEIGHT, normalize_weight};
///
/// assert_eq!(normalize_weight(2.5), 2.5);
/// assert_eq!(normalize_weight(-1.0), 0.0);
/// assert_eq!(normalize_weight(f64::INFINITY), MAX_WEIGHT);
/// ```
pub fn normalize_weight(raw: f64,) -> f64
{
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_WEIGHT,)
}
