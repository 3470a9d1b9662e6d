use crate::geom::point::Point2;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LightSourceError {
    #[error("光源位置不是有限浮点数：({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },
    #[error("光源强度（照射半径）必须是正的有限数，实际为 {intensity}")]
    InvalidIntensity { intensity: f64 },
}

/// 点光源：位置与强度（照射半径）。每次查询临时构造，不做持久化。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
}

impl LightSource {
    pub const fn new(x: f64, y: f64, intensity: f64) -> Self {
        Self { x, y, intensity }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn validate(&self) -> Result<(), LightSourceError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(LightSourceError::NonFinitePosition {
                x: self.x,
                y: self.y,
            });
        }
        if !self.intensity.is_finite() || self.intensity <= 0.0 {
            return Err(LightSourceError::InvalidIntensity {
                intensity: self.intensity,
            });
        }
        Ok(())
    }

    /// `point` 是否在照射半径内（含边界）。
    pub fn reaches(&self, point: Point2) -> bool {
        point.distance_to(self.position()) <= self.intensity
    }
}
