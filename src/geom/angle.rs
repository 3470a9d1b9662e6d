//! 角度工具：极角、角度差与转向。
//!
//! 约定：
//! - 角度一律以“度”为单位；
//! - 极角范围为 `(-180, 180]`，即负 x 轴方向记为 `180` 而不是 `-180`。

use core::fmt;

/// 转向：从上一个角度到当前角度的最短旋转方向。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    None,
    /// 逆时针（角度增大）。
    Left,
    /// 顺时针（角度减小）。
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::None => write!(f, "None"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// 向量 `(x, y)` 的极角（度），范围 `(-180, 180]`。
///
/// 零向量返回 `0`（与 `atan2(0, 0)` 一致）。
pub fn vector_angle(x: f64, y: f64) -> f64 {
    // 负 x 轴（含 y = -0.0）固定落在 180，不受弧度换算舍入影响。
    if y == 0.0 && x < 0.0 {
        return 180.0;
    }
    normalize_angle(y.atan2(x).to_degrees())
}

/// 把任意有限角度折叠到 `(-180, 180]`。
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// 从 `from` 到 `to` 的有符号最短角度差。
///
/// 跨越 ±180° 边界时按最短方向计：`angle_difference(170, -170) == 20`。
/// 反对称：`angle_difference(a, b) == -angle_difference(b, a)`；
/// 输入在 `[-180, 180]` 内时结果也在 `[-180, 180]` 内。
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let mut diff = to - from;
    while diff > 180.0 {
        diff -= 360.0;
    }
    while diff < -180.0 {
        diff += 360.0;
    }
    diff
}

pub fn direction(last_angle: f64, current_angle: f64) -> Direction {
    let diff = angle_difference(last_angle, current_angle);
    if diff > 0.0 {
        Direction::Left
    } else if diff < 0.0 {
        Direction::Right
    } else {
        Direction::None
    }
}
