use crate::geom::point::Point2;
use crate::geom::predicates::cross;
use crate::geom::segment::Segment;

/// 判定“平行”的相对阈值：`|r × s| <= PARALLEL_EPS * |r| * |s|`。
const PARALLEL_EPS: f64 = 1e-12;

/// 两条线段的点交。
///
/// - `t`：交点在第一条线段上的参数（`a.a + t * (a.b - a.a)`）
/// - `u`：交点在第二条线段上的参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIntersection {
    pub point: Point2,
    pub t: f64,
    pub u: f64,
}

/// 计算两条线段的交点（参数方程法）：
/// - 平行或共线：返回 `None`（共线重叠不产生唯一交点，按“不相交”处理）；
/// - 任一参数落在 `[0, 1]` 之外：返回 `None`；
/// - 否则返回交点与两个参数。端点接触也算相交。
pub fn intersect_segments(a: &Segment, b: &Segment) -> Option<SegmentIntersection> {
    let r = a.b - a.a;
    let s = b.b - b.a;
    let denom = cross(r, s);

    let scale = r.length() * s.length();
    if scale == 0.0 || denom.abs() <= PARALLEL_EPS * scale {
        return None;
    }

    let qp = b.a - a.a;
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(SegmentIntersection {
        point: a.point_at(t),
        t,
        u,
    })
}
