use crate::constants::DIRECTION_EPSILON;

/// A planar rotation stored as its cosine and sine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation2 {
    cos: f64,
    sin: f64,
}

impl Rotation2 {
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    pub fn from_radians(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { cos, sin }
    }

    /// The angle of the vector `(x, y)`, or zero when the vector is too short
    /// to have a direction.
    pub fn from_xy(x: f64, y: f64) -> Self {
        let norm = x.hypot(y);
        if norm > DIRECTION_EPSILON {
            Self {
                cos: x / norm,
                sin: y / norm,
            }
        } else {
            Self::IDENTITY
        }
    }

    pub fn radians(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn inverse(&self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }
}

impl Default for Rotation2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A vector of length `magnitude` pointing along `direction`.
    pub fn from_polar(magnitude: f64, direction: Rotation2) -> Self {
        Self::new(magnitude, 0.0).rotate_by(direction)
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn rotate_by(&self, rotation: Rotation2) -> Self {
        let Self { x, y } = *self;
        let Rotation2 { cos, sin } = rotation;
        Self {
            x: x * cos - y * sin,
            y: x * sin + y * cos,
        }
    }
}
