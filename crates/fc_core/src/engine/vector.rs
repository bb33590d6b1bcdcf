//! 2D vector math for the pitch plane.
//!
//! Everything else in the engine builds on this: positions and velocities
//! are `Vec2` in meters / meters-per-second on the 105x68 plane. Operations
//! are `f32` throughout; the engine never needs more precision than the
//! collision tolerances it works to.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Position, velocity, or direction on the pitch plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Tie-break direction when two centers coincide exactly.
    pub const UP: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in this direction, or `fallback` when the length is zero.
    ///
    /// The fallback keeps callers out of the 0/0 trap without an `Option`
    /// on the hot path; collision code passes `Vec2::UP` as its tie-break.
    #[inline]
    pub fn normalized_or(self, fallback: Vec2) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            fallback
        }
    }

    /// Clamp the magnitude to `max_length`, preserving direction.
    #[inline]
    pub fn clamp_length(self, max_length: f32) -> Vec2 {
        let len_sq = self.length_squared();
        if len_sq > max_length * max_length {
            self * (max_length / len_sq.sqrt())
        } else {
            self
        }
    }

    /// Clamp both components into a rectangle spanning the origin.
    #[inline]
    pub fn clamp_components(self, max: Vec2) -> Vec2 {
        Vec2::new(self.x.clamp(0.0, max.x), self.y.clamp(0.0, max.y))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_length() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.dot(Vec2::new(1.0, 0.0)), 3.0);
    }

    #[test]
    fn test_normalized_or_fallback() {
        assert_eq!(Vec2::ZERO.normalized_or(Vec2::UP), Vec2::UP);
        let n = Vec2::new(10.0, 0.0).normalized_or(Vec2::UP);
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert_eq!(n, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_clamp_length() {
        let v = Vec2::new(6.0, 8.0).clamp_length(5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        let w = Vec2::new(1.0, 1.0).clamp_length(5.0);
        assert_eq!(w, Vec2::new(1.0, 1.0));
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: normalization always yields a unit vector (or the fallback).
            #[test]
            fn prop_normalized_is_unit(x in -100.0f32..100.0, y in -100.0f32..100.0) {
                let n = Vec2::new(x, y).normalized_or(Vec2::UP);
                prop_assert!((n.length() - 1.0).abs() < 1e-3);
            }

            /// Property: clamp_length never exceeds the bound.
            #[test]
            fn prop_clamp_length_bounded(x in -100.0f32..100.0, y in -100.0f32..100.0, max in 0.1f32..50.0) {
                let v = Vec2::new(x, y).clamp_length(max);
                prop_assert!(v.length() <= max * 1.001);
            }
        }
    }
}
