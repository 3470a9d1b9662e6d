//! 起始动作（start actions）：扫描开始前就已经穿过参考射线的边。
//!
//! 扫描从 -180° 出发，终点是 180°，二者是同一条射线（负 x 轴）。
//! 跨过这条射线的边（一端 `y >= 0`、另一端 `y < 0`，且与负 x 轴相交）
//! 在扫描开始时就处于“打开”状态，必须预先放入活动集合；
//! 登记的端点是 `y >= 0` 的那一端（角度落在 `[0, 180]`），它会在扫描后段再次被遇到并重新打开。

use tracing::debug;

use crate::geom::segment::{Segment, SegmentId, Segments};
use crate::sweep::status::OpenEdges;
use crate::sweep::viewport::{SegmentEnd, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("线段 {segment:?} 的 {end:?} 端在视口中找不到对应的点（几何拓扑不一致）")]
    SegmentNotInViewport { segment: SegmentId, end: SegmentEnd },
}

/// 计算起始活动集合。
///
/// 参考射线从原点沿负 x 轴延伸 `reach`：取 `intensity` 与最远端点距离中较大者，
/// 保证跨过负 x 轴、之后又回到半径内的边不会漏掉。
/// 只擦过负 x 轴而不跨越的边（两端同在一侧）不登记。
///
/// 登记的端点必须能在视口中按 `SegmentId` 找到且坐标一致，否则返回
/// `SeedError::SegmentNotInViewport`（调用方在两次构建之间改动了几何）。
pub fn start_actions(
    segments: &Segments,
    viewport: &Viewport,
    intensity: f64,
) -> Result<OpenEdges, SeedError> {
    let reach = intensity.max(segments.max_endpoint_distance());
    let border = Segment::new(0.0, 0.0, -reach, 0.0);

    let mut open = OpenEdges::new();
    for id in segments.ids() {
        let segment = &segments[id].segment;

        let a_upper = segment.a.y >= 0.0;
        let b_upper = segment.b.y >= 0.0;
        if a_upper == b_upper {
            continue;
        }
        if !segment.intersects(&border) {
            continue;
        }

        let (end, point) = if a_upper {
            (SegmentEnd::A, segment.a)
        } else {
            (SegmentEnd::B, segment.b)
        };

        let found = viewport
            .position(id, end)
            .and_then(|index| viewport.get(index))
            .filter(|vp| vp.point == point);
        if found.is_none() {
            return Err(SeedError::SegmentNotInViewport { segment: id, end });
        }

        open.seed(id, end);
    }

    debug!(open = open.len(), reach, "起始活动集合已确定");
    Ok(open)
}
