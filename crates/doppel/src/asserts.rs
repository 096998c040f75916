//! Small assertion helpers shared by the suites.

use std::fmt::Debug;

/// Asserts that both values are equal, showing both representations on
/// failure.
#[track_caller]
pub fn eq_<T: PartialEq + Debug>(a: T, b: T) {
    assert!(a == b, "{a:?} != {b:?}");
}

/// Like [`eq_`], with a caller-supplied failure message.
#[track_caller]
pub fn eq_msg<T: PartialEq + Debug>(a: T, b: T, msg: &str) {
    assert!(a == b, "{msg}");
}

/// Asserts equality after rounding both operands to `places` decimal places.
#[track_caller]
#[allow(clippy::float_cmp)]
pub fn assert_almost_equal(a: f64, b: f64, places: i32) {
    let factor = 10f64.powi(places);
    let rounded_a = (a * factor).round() / factor;
    let rounded_b = (b * factor).round() / factor;
    assert!(rounded_a == rounded_b, "{a:?} != {b:?} (to {places} places)");
}
