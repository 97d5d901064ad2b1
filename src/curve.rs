//! Keyframed response curves.
//!
//! Flight feel is tuned with curves mapping an avatar's armspan to a
//! multiplier. Each segment between two keyframes is a cubic Hermite
//! spline; keyframes built from a bare `(time, value)` pair get flat
//! tangents, which eases smoothly between keys without overshoot. Outside
//! the keyed range the curve holds the nearest endpoint value.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single control point of a [`ResponseCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Input coordinate of the key.
    pub time: f32,
    /// Output value at `time`.
    pub value: f32,
    /// Slope arriving at the key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving the key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Creates a keyframe with flat tangents.
    #[must_use]
    pub const fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// Creates a keyframe with explicit tangents.
    #[must_use]
    pub const fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Reasons a curve cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The curve has no keyframes.
    #[error("curve has no keyframes")]
    Empty,
    /// A keyframe holds NaN or an infinity.
    #[error("keyframe {index} is not finite")]
    NonFinite {
        /// Position of the offending key.
        index: usize,
    },
    /// Keyframe times are not strictly increasing.
    #[error("keyframe {index} at time {time} does not follow the previous key")]
    Unordered {
        /// Position of the offending key.
        index: usize,
        /// Time of the offending key.
        time: f32,
    },
}

/// Piecewise cubic curve over a sorted list of keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct ResponseCurve {
    keys: Vec<Keyframe>,
}

impl ResponseCurve {
    /// Builds a curve, checking that keys are finite and strictly ordered.
    ///
    /// # Errors
    /// Returns a [`CurveError`] when the keyframes are empty, contain
    /// non-finite numbers or are not sorted by time.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            let finite = key.time.is_finite()
                && key.value.is_finite()
                && key.in_tangent.is_finite()
                && key.out_tangent.is_finite();
            if !finite {
                return Err(CurveError::NonFinite { index });
            }
        }
        for (index, pair) in keys.windows(2).enumerate() {
            if let [previous, next] = pair {
                if next.time <= previous.time {
                    return Err(CurveError::Unordered {
                        index: index + 1,
                        time: next.time,
                    });
                }
            }
        }
        Ok(Self { keys })
    }

    /// Builds a curve from `(time, value)` pairs with flat tangents.
    ///
    /// # Errors
    /// See [`ResponseCurve::new`].
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, CurveError> {
        Self::new(
            points
                .iter()
                .map(|&(time, value)| Keyframe::new(time, value))
                .collect(),
        )
    }

    /// Default armspan to flap-strength multiplier.
    ///
    /// Smaller avatars flap harder and larger ones feel heavier.
    #[must_use]
    pub fn default_size() -> Self {
        Self {
            keys: vec![
                Keyframe::new(0.05, 2.0),
                Keyframe::new(1.0, 1.0),
                Keyframe::new(20.0, 0.001_95),
            ],
        }
    }

    /// Default armspan to gravity multiplier.
    #[must_use]
    pub fn default_gravity() -> Self {
        Self {
            keys: vec![
                Keyframe::new(0.05, 0.4),
                Keyframe::new(1.0, 0.2),
                Keyframe::new(20.0, 0.000_39),
            ],
        }
    }

    /// The keyframes in time order.
    #[must_use]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluates the curve at `x`.
    ///
    /// Inputs before the first key or after the last one return the
    /// endpoint value. NaN evaluates as the first key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avatar_flight::curve::ResponseCurve;
    /// let curve = ResponseCurve::default_size();
    /// assert!((curve.evaluate(1.0) - 1.0).abs() < f32::EPSILON);
    /// assert!((curve.evaluate(0.0) - 2.0).abs() < f32::EPSILON);
    /// assert!((curve.evaluate(50.0) - 0.00195).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn evaluate(&self, x: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if x.is_nan() || x <= first.time {
            return first.value;
        }
        if x >= last.time {
            return last.value;
        }
        self.keys
            .windows(2)
            .find_map(|pair| match pair {
                [start, end] if x <= end.time => Some(hermite(start, end, x)),
                _ => None,
            })
            .unwrap_or(last.value)
    }
}

impl TryFrom<Vec<Keyframe>> for ResponseCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<ResponseCurve> for Vec<Keyframe> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

/// Cubic Hermite interpolation between two keys.
fn hermite(start: &Keyframe, end: &Keyframe, x: f32) -> f32 {
    let span = end.time - start.time;
    let u = (x - start.time) / span;
    let u2 = u * u;
    let u3 = u2 * u;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    h00 * start.value
        + h10 * span * start.out_tangent
        + h01 * end.value
        + h11 * span * end.in_tangent
}
