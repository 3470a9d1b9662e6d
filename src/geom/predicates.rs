//! 几何谓词（predicate）：叉积。
//!
//! 坐标是 `f64`，结果不精确；调用方按需要自带容差。

use crate::geom::point::Point2;

/// 二维叉积 `u × v`。
///
/// 返回值的符号约定：
/// - `> 0`：`v` 在 `u` 的左侧（逆时针）
/// - `< 0`：`v` 在 `u` 的右侧（顺时针）
/// - `= 0`：共线
pub fn cross(u: Point2, v: Point2) -> f64 {
    u.x * v.y - u.y * v.x
}
