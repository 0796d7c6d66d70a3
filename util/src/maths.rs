//! Utility maths functions
//!
//! Compass angles throughout the software are `f64` degrees on a [0, 360)
//! circle, measured clockwise from north. The functions here provide the
//! circular arithmetic needed to compare and fold such angles.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Normalise an angle in degrees into the range [0, 360).
pub fn wrap_360<T>(angle_deg: T) -> T
where
    T: Float + std::ops::Rem
{
    rem_euclid(angle_deg, T::from(360.0).unwrap())
}

/// Get the signed shortest rotation from one bearing to another, in degrees.
///
/// The result is in [-180, 180] and is positive when `to_deg` lies clockwise
/// (to starboard) of `from_deg`, accounting for wrapping at north. For
/// diametrically opposed bearings +180 is returned.
pub fn ang_delta_180<T>(from_deg: T, to_deg: T) -> T
where
    T: Float + std::ops::Rem
{
    let full_t: T = T::from(360.0).unwrap();

    let anticlock = rem_euclid(from_deg - to_deg, full_t);
    let clock = rem_euclid(to_deg - from_deg, full_t);

    if anticlock < clock {
        -anticlock
    }
    else {
        clock
    }
}

/// Fold an angle into the half-circle [0, 180].
///
/// The input is first normalised into [0, 360), then values above the
/// half-circle are reflected back into it, so that the result measures how
/// far round the circle the angle sits regardless of which side it is on.
/// Note that 180 itself folds to 0.
pub fn mirror_180<T>(angle_deg: T) -> T
where
    T: Float + std::ops::Rem
{
    let full_t: T = T::from(360.0).unwrap();
    let half_t: T = T::from(180.0).unwrap();

    let angle = rem_euclid(angle_deg, full_t);

    if angle >= half_t {
        rem_euclid(full_t - angle, half_t)
    }
    else {
        angle
    }
}

/// Clamp a value into the range [min, max].
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float + std::ops::Mul + std::ops::Add + std::ops::AddAssign
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float + std::ops::Mul + std::ops::Add + std::ops::Sub + std::ops::Rem
{
    let r = lhs % rhs;
    if r < T::from(0.0).unwrap() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrap_360() {
        assert_eq!(wrap_360(0f64), 0f64);
        assert_eq!(wrap_360(360f64), 0f64);
        assert_eq!(wrap_360(365f64), 5f64);
        assert_eq!(wrap_360(-10f64), 350f64);
        assert_eq!(wrap_360(-370f64), 350f64);
        assert_eq!(wrap_360(725f64), 5f64);
    }

    #[test]
    fn test_ang_delta_180() {
        assert_eq!(ang_delta_180(10f64, 20f64), 10f64);
        assert_eq!(ang_delta_180(20f64, 10f64), -10f64);
        assert_eq!(ang_delta_180(350f64, 10f64), 20f64);
        assert_eq!(ang_delta_180(10f64, 350f64), -20f64);
        assert_eq!(ang_delta_180(0f64, 360f64), 0f64);
        assert_eq!(ang_delta_180(90f64, 270f64), 180f64);
    }

    #[test]
    fn test_ang_delta_180_antisymmetric() {
        // Antisymmetry over a sweep of non-antipodal pairs, and the range
        // bound over all of them
        for i in 0..36 {
            for j in 0..36 {
                let a = (i as f64) * 10.0;
                let b = (j as f64) * 10.0;

                let d_ab = ang_delta_180(a, b);

                assert!(d_ab >= -180.0 && d_ab <= 180.0);

                if ang_delta_180(a, b).abs() != 180.0 {
                    assert_eq!(d_ab, -ang_delta_180(b, a));
                }
            }
        }
    }

    #[test]
    fn test_mirror_180() {
        assert_eq!(mirror_180(0f64), 0f64);
        assert_eq!(mirror_180(90f64), 90f64);
        assert_eq!(mirror_180(180f64), 0f64);
        assert_eq!(mirror_180(270f64), 90f64);
        assert_eq!(mirror_180(200f64), 160f64);
        assert_eq!(mirror_180(359f64), 1f64);

        // Out of range inputs are normalised first
        assert_eq!(mirror_180(-90f64), 90f64);
        assert_eq!(mirror_180(630f64), 90f64);

        // Range bound over the full circle
        for i in 0..360 {
            let m = mirror_180(i as f64);
            assert!(m >= 0.0 && m <= 180.0);
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&5f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-5f64, &-1f64, &1f64), -1f64);
        assert_eq!(clamp(&0.5f64, &-1f64, &1f64), 0.5f64);
    }
}
