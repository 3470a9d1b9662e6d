//! 可见性判定与光线投射。
//!
//! 对每个候选点都从起始活动集合重新切换到候选角度（不在两次判定之间携带状态），
//! 再用“原点 -> 候选点”的探测线段与活动边逐一求交。

use std::collections::BTreeSet;

use tracing::warn;

use crate::geom::angle::normalize_angle;
use crate::geom::intersection::intersect_segments;
use crate::geom::point::Point2;
use crate::geom::segment::{Segment, SegmentId, Segments};
use crate::preprocess::{Warning, WarningKind};
use crate::sweep::status::{OpenEdges, Toggle};
use crate::sweep::viewport::{SegmentEnd, Viewport, ViewportPoint};

/// 待判定的点（以光源为原点）。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub point: Point2,
    /// 用于切换活动集合的角度，范围 `(-180, 180]`。
    pub angle: f64,
    /// 候选点本身是哪条边的端点（采样光线为 `None`）。
    pub segment: Option<SegmentId>,
}

impl Candidate {
    pub fn from_viewport(point: &ViewportPoint) -> Self {
        Self {
            point: point.point,
            angle: point.angle,
            segment: Some(point.segment),
        }
    }

    /// 沿 `angle` 方向、距离 `reach` 处的采样点。
    pub fn ray(angle: f64, reach: f64) -> Self {
        let angle = normalize_angle(angle);
        Self {
            point: Point2::from_polar(angle, reach),
            angle,
            segment: None,
        }
    }
}

/// 一次光照计算中的扫描上下文：边集合、视口、起始活动集合，以及扫描中收集的告警。
pub struct Sweep<'a> {
    segments: &'a Segments,
    viewport: &'a Viewport,
    start: &'a OpenEdges,
    expansion: f64,
    reported: BTreeSet<(SegmentId, SegmentEnd)>,
    warnings: Vec<Warning>,
}

impl<'a> Sweep<'a> {
    /// `expansion`：构建边集合时使用的延长比例，用来识别相邻边在角点处的接缝重叠。
    pub fn new(
        segments: &'a Segments,
        viewport: &'a Viewport,
        start: &'a OpenEdges,
        expansion: f64,
    ) -> Self {
        Self {
            segments,
            viewport,
            start,
            expansion,
            reported: BTreeSet::new(),
            warnings: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &'a Viewport {
        self.viewport
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// 从起始活动集合出发，切换所有 `angle <= target` 的视口点，得到该角度上的活动边。
    pub fn open_edges_at(&mut self, target: f64) -> OpenEdges {
        let mut open = self.start.clone();
        for p in self.viewport.iter() {
            if p.angle > target {
                break;
            }
            if open.toggle(p) == Toggle::AlreadyOpen {
                self.report_duplicate(p);
            }
        }
        open
    }

    /// 探测线段“原点 -> 候选点”是否不被任何活动边挡住。
    ///
    /// 候选点是某条边的端点时，忽略它自身所在的边，并忽略落在接缝重叠里的命中：
    /// 命中点位于命中边的延长段内，或离候选点不超过候选边两端延长量之和。
    pub fn is_visible(&mut self, candidate: &Candidate) -> bool {
        let open = self.open_edges_at(candidate.angle);
        let probe = Segment::from_points(Point2::ORIGIN, candidate.point);
        let probe_length = probe.length();
        let own_length = candidate
            .segment
            .and_then(|id| self.segments.try_get(id))
            .map(|s| s.segment.length());

        for id in open.ids() {
            if candidate.segment == Some(id) {
                continue;
            }
            let Some(edge) = self.segments.try_get(id).map(|s| s.segment) else {
                continue;
            };
            let Some(hit) = intersect_segments(&probe, &edge) else {
                continue;
            };
            if let Some(own_length) = own_length {
                let gap = probe_length * (1.0 - hit.t);
                if self.in_stub(hit.u) || gap <= 2.0 * self.stub_fraction() * own_length {
                    continue;
                }
            }
            return false;
        }
        true
    }

    /// 延长段占延长后边长的比例（每端）。
    fn stub_fraction(&self) -> f64 {
        self.expansion / 2.0 / (1.0 + self.expansion)
    }

    /// 参数 `u` 是否落在边两端的延长段内。
    fn in_stub(&self, u: f64) -> bool {
        let f = self.stub_fraction();
        u <= f || u >= 1.0 - f
    }

    /// 沿 `angle` 方向射出长度为 `reach` 的光线，返回与活动边最近的交点。
    pub fn nearest_hit(&mut self, angle: f64, reach: f64) -> Option<Point2> {
        let angle = normalize_angle(angle);
        let open = self.open_edges_at(angle);
        let probe = Segment::from_points(Point2::ORIGIN, Point2::from_polar(angle, reach));

        open.ids()
            .filter_map(|id| self.segments.try_get(id))
            .filter_map(|s| intersect_segments(&probe, &s.segment))
            .min_by(|a, b| a.t.total_cmp(&b.t))
            .map(|hit| hit.point)
    }

    /// 采样光线：光线能照满 `reach` 时返回半径上的点，否则返回最近的遮挡点。
    pub fn sample(&mut self, angle: f64, reach: f64) -> Point2 {
        let candidate = Candidate::ray(angle, reach);
        if self.is_visible(&candidate) {
            return candidate.point;
        }
        self.nearest_hit(candidate.angle, reach)
            .unwrap_or(candidate.point)
    }

    fn report_duplicate(&mut self, p: &ViewportPoint) {
        if !self.reported.insert((p.segment, p.end)) {
            return;
        }
        let (resistor_index, edge_index) = self
            .segments
            .try_get(p.segment)
            .map(|s| (s.resistor_index, s.edge_index))
            .unwrap_or((usize::MAX, usize::MAX));
        let warning = Warning {
            resistor_index,
            edge_index,
            kind: WarningKind::DuplicateTopology {
                segment: p.segment,
                angle: p.angle,
            },
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::LightSource;
    use crate::preprocess::build_segments;
    use crate::resistor::LightResistor;
    use crate::sweep::start::start_actions;
    use crate::sweep::viewport::build_viewport;

    /// 光源 (320, 240)、半径 300，正下方 20~40 处有一个 40×20 的方块。
    fn square_scene() -> (Segments, LightSource) {
        let resistor = LightResistor::from_vertices([
            Point2::new(340.0, 220.0),
            Point2::new(340.0, 200.0),
            Point2::new(300.0, 200.0),
            Point2::new(300.0, 220.0),
        ]);
        let light = LightSource::new(320.0, 240.0, 300.0);
        let out = build_segments(&[resistor], &[0], &light, 0.01);
        (out.segments, light)
    }

    #[test]
    fn rays_behind_the_square_are_blocked() {
        let (segments, light) = square_scene();
        let viewport = build_viewport(&segments);
        let start = start_actions(&segments, &viewport, light.intensity).unwrap();
        assert!(start.is_empty());
        let mut sweep = Sweep::new(&segments, &viewport, &start, 0.01);

        assert!(!sweep.is_visible(&Candidate::ray(-90.0, 300.0)));
        assert!(!sweep.is_visible(&Candidate::ray(-60.0, 300.0)));
        assert!(sweep.is_visible(&Candidate::ray(0.0, 300.0)));
        assert!(sweep.is_visible(&Candidate::ray(-150.0, 300.0)));
        assert!(sweep.is_visible(&Candidate::ray(90.0, 300.0)));

        let hit = sweep.nearest_hit(-90.0, 300.0).unwrap();
        assert!(hit.x.abs() < 1e-9);
        assert!((hit.y + 20.0).abs() < 1e-9);

        let open = sweep.sample(0.0, 300.0);
        assert!((open.x - 300.0).abs() < 1e-9);
        assert!(sweep.warnings().is_empty());
    }

    #[test]
    fn only_near_corners_are_visible() {
        let (segments, light) = square_scene();
        let viewport = build_viewport(&segments);
        let start = start_actions(&segments, &viewport, light.intensity).unwrap();
        let mut sweep = Sweep::new(&segments, &viewport, &start, 0.01);

        let mut visible = 0;
        for p in viewport.iter() {
            let near_corner = p.point.length() < 30.0;
            assert_eq!(
                sweep.is_visible(&Candidate::from_viewport(p)),
                near_corner,
                "{:?}",
                p
            );
            visible += usize::from(near_corner);
        }
        assert_eq!(visible, 4);
    }

    #[test]
    fn long_wall_hides_corners_just_behind_it() {
        let wall = LightResistor::from_vertices([Point2::new(-1000.0, 50.0), Point2::new(1000.0, 50.0)]);
        let boxed = LightResistor::from_vertices([
            Point2::new(-3.0, 55.0),
            Point2::new(3.0, 55.0),
            Point2::new(3.0, 60.0),
            Point2::new(-3.0, 60.0),
        ]);
        let light = LightSource::new(0.0, 0.0, 2000.0);
        let out = build_segments(&[wall, boxed], &[0, 1], &light, 0.01);
        let viewport = build_viewport(&out.segments);
        let start = start_actions(&out.segments, &viewport, light.intensity).unwrap();
        let mut sweep = Sweep::new(&out.segments, &viewport, &start, 0.01);

        for p in viewport.iter().filter(|p| p.segment != SegmentId(0)) {
            assert!(!sweep.is_visible(&Candidate::from_viewport(p)), "{:?}", p);
        }
        // 墙的两端本身可见。
        for p in viewport.iter().filter(|p| p.segment == SegmentId(0)) {
            assert!(sweep.is_visible(&Candidate::from_viewport(p)), "{:?}", p);
        }
    }

    #[test]
    fn seeded_edge_blocks_rays_on_both_sides_of_the_boundary() {
        let resistor = LightResistor::from_vertices([Point2::new(-5.0, -2.0), Point2::new(-5.0, 2.0)]);
        let light = LightSource::new(0.0, 0.0, 50.0);
        let out = build_segments(&[resistor], &[0], &light, 0.01);
        let viewport = build_viewport(&out.segments);
        let start = start_actions(&out.segments, &viewport, light.intensity).unwrap();
        assert_eq!(start.len(), 1);
        let mut sweep = Sweep::new(&out.segments, &viewport, &start, 0.01);

        assert!(!sweep.is_visible(&Candidate::ray(-179.0, 50.0)));
        assert!(!sweep.is_visible(&Candidate::ray(180.0, 50.0)));
        assert!(!sweep.is_visible(&Candidate::ray(175.0, 50.0)));
        assert!(sweep.is_visible(&Candidate::ray(-150.0, 50.0)));
        assert!(sweep.is_visible(&Candidate::ray(150.0, 50.0)));
    }

    #[test]
    fn duplicate_endpoint_is_reported_once() {
        let resistor = LightResistor::from_vertices([Point2::new(5.0, -1.0), Point2::new(5.0, 1.0)]);
        let light = LightSource::new(0.0, 0.0, 50.0);
        let segments = build_segments(&[resistor], &[0], &light, 0.0).segments;

        let edge = segments.get(SegmentId(0)).segment;
        let a = ViewportPoint::new(edge.a, SegmentId(0), SegmentEnd::A);
        let b = ViewportPoint::new(edge.b, SegmentId(0), SegmentEnd::B);
        let viewport = Viewport::from_points(vec![a, a, b]);
        let start = OpenEdges::new();
        let mut sweep = Sweep::new(&segments, &viewport, &start, 0.0);

        let open = sweep.open_edges_at(0.0);
        assert!(open.contains(SegmentId(0)));
        let _ = sweep.open_edges_at(90.0);
        let _ = sweep.is_visible(&Candidate::ray(45.0, 50.0));

        let warnings = sweep.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].resistor_index, 0);
        assert!(matches!(
            warnings[0].kind,
            WarningKind::DuplicateTopology { segment: SegmentId(0), .. }
        ));
    }
}
