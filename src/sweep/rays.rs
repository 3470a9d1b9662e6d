//! 光线采样与多边形组装。
//!
//! 按角度从 -180° 扫到 180°：
//! - 两个相邻视口点之间，按固定步长 `360 / parts_num` 补采样光线；
//! - 视口点在半径内且可见时，输出该点本身，并在 `±ε` 方向各补一条采样光线，
//!   以便捕捉角点两侧“照到半径”与“被后方边挡住”的落差；
//! - 视口点在半径外时，沿它的方向采样一次；
//! - 最后补到 180°，并始终采样 180° 方向。
//!
//! 所有点以光源为原点，最后按角度（同角度按距离）排序并去掉完全重合的点。

use tracing::debug;

use crate::geom::point::Point2;
use crate::options::SweepOptions;
use crate::sweep::visibility::{Candidate, Sweep};

/// 组装可见区域多边形的顶点（光源坐标系）。
pub fn assemble(sweep: &mut Sweep<'_>, intensity: f64, options: &SweepOptions) -> Vec<Point2> {
    let delta = options.delta_degrees();
    let epsilon = options.edge_epsilon_degrees;
    let viewport = sweep.viewport();

    let mut points = Vec::new();
    let mut position = -180.0_f64;

    for vp in viewport.iter() {
        fill_gap(sweep, position, vp.angle, delta, intensity, &mut points);

        if vp.point.length() > intensity {
            points.push(sweep.sample(vp.angle, intensity));
        } else if sweep.is_visible(&Candidate::from_viewport(vp)) {
            points.push(vp.point);
            points.push(sweep.sample(vp.angle - epsilon, intensity));
            points.push(sweep.sample(vp.angle + epsilon, intensity));
        }

        position = position.max(vp.angle);
    }

    fill_gap(sweep, position, 180.0, delta, intensity, &mut points);
    points.push(sweep.sample(180.0, intensity));

    let raw = points.len();
    let polygon = sort_and_dedup(points);
    debug!(
        viewport = viewport.len(),
        raw,
        vertices = polygon.len(),
        "多边形顶点已组装"
    );
    polygon
}

/// 累加步长的舍入误差容差（相对 `delta`）。
const GAP_TOLERANCE: f64 = 1e-9;

/// 在 `(from, to)` 内按 `from + k·delta`（`k >= 1`）补采样光线，不含 `to`。
///
/// 与 `to` 相差不到 `delta × GAP_TOLERANCE` 的角度视为 `to` 本身，不再补采样。
fn fill_gap(
    sweep: &mut Sweep<'_>,
    from: f64,
    to: f64,
    delta: f64,
    intensity: f64,
    points: &mut Vec<Point2>,
) {
    let limit = to - delta * GAP_TOLERANCE;
    let mut k = 1_u32;
    loop {
        let angle = from + f64::from(k) * delta;
        if angle >= limit {
            break;
        }
        points.push(sweep.sample(angle, intensity));
        k += 1;
    }
}

/// 按极角排序（同角度按距离由近到远），并移除完全相同的相邻点。
pub fn sort_and_dedup(mut points: Vec<Point2>) -> Vec<Point2> {
    points.sort_by(|a, b| {
        a.angle()
            .total_cmp(&b.angle())
            .then_with(|| a.length().total_cmp(&b.length()))
    });
    points.dedup();
    points
}
