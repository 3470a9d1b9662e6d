use core::ops::{Add, Sub};

use crate::geom::angle::vector_angle;

/// 平面上的点（也兼作以原点为起点的向量）。
///
/// 相等性即坐标相等（逐分量 `f64` 比较，不做容差）。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 按角度（度）与长度构造点，角度约定与 [`vector_angle`] 一致。
    pub fn from_polar(angle_degrees: f64, length: f64) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            x: radians.cos() * length,
            y: radians.sin() * length,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 到原点的距离。
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: Point2) -> f64 {
        (*self - other).length()
    }

    /// 以原点为观察点的极角（度），范围 `(-180, 180]`。
    pub fn angle(&self) -> f64 {
        vector_angle(self.x, self.y)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Self::Output {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
