//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output dimensions for a width-targeted variant.
///
/// Resize-down-only: a target at or above the source width keeps the source
/// dimensions untouched, so no variant is ever enlarged. A `None` target means
/// the full-size variant, which always keeps native dimensions.
///
/// # Arguments
/// * `original` - Upright source dimensions (width, height)
/// * `target_width` - Requested width, or `None` for full size
///
/// # Returns
/// * `(width, height)` - Output dimensions with the source aspect ratio
///
/// # Examples
/// ```
/// # use asset_variants::imaging::calculate_variant_dimensions;
/// assert_eq!(calculate_variant_dimensions((1600, 900), Some(480)), (480, 270));
/// assert_eq!(calculate_variant_dimensions((300, 200), Some(1200)), (300, 200));
/// assert_eq!(calculate_variant_dimensions((300, 200), None), (300, 200));
/// ```
pub fn calculate_variant_dimensions(original: (u32, u32), target_width: Option<u32>) -> (u32, u32) {
    let (orig_w, orig_h) = original;

    match target_width {
        Some(target) if target < orig_w => {
            let ratio = target as f64 / orig_w as f64;
            let height = (orig_h as f64 * ratio).round().max(1.0) as u32;
            (target, height)
        }
        _ => (orig_w, orig_h),
    }
}
