//! 视口（viewport）：光源看到的全部边端点，按极角升序排列。
//!
//! 每条边恰好产生两个视口点，二者互为 `other`（同一条边的另一端）。

use std::collections::BTreeMap;

use tracing::trace;

use crate::geom::point::Point2;
use crate::geom::segment::{SegmentId, Segments};

/// 视口点属于所在边的哪一端（`a` 或 `b`）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentEnd {
    A,
    B,
}

impl SegmentEnd {
    pub fn other(self) -> Self {
        match self {
            SegmentEnd::A => SegmentEnd::B,
            SegmentEnd::B => SegmentEnd::A,
        }
    }

    fn slot(self) -> usize {
        match self {
            SegmentEnd::A => 0,
            SegmentEnd::B => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportPoint {
    /// 以光源为原点的坐标。
    pub point: Point2,
    /// 极角（度），范围 `(-180, 180]`。
    pub angle: f64,
    pub segment: SegmentId,
    pub end: SegmentEnd,
}

impl ViewportPoint {
    pub fn new(point: Point2, segment: SegmentId, end: SegmentEnd) -> Self {
        Self {
            point,
            angle: point.angle(),
            segment,
            end,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Viewport {
    points: Vec<ViewportPoint>,
    /// `SegmentId -> [A 端下标, B 端下标]`（下标指向 `points`）。
    slots: BTreeMap<SegmentId, [usize; 2]>,
}

impl Viewport {
    /// 由任意顺序的视口点构造：按极角稳定排序并建立端点索引。
    ///
    /// 同角度的点之间的先后顺序不影响扫描结果。
    pub fn from_points(mut points: Vec<ViewportPoint>) -> Self {
        points.sort_by(|a, b| a.angle.total_cmp(&b.angle));

        let mut slots: BTreeMap<SegmentId, [usize; 2]> = BTreeMap::new();
        for (index, p) in points.iter().enumerate() {
            slots.entry(p.segment).or_insert([usize::MAX; 2])[p.end.slot()] = index;
        }

        Self { points, slots }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ViewportPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[ViewportPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&ViewportPoint> {
        self.points.get(index)
    }

    /// 边 `segment` 的 `end` 端在视口中的下标。
    pub fn position(&self, segment: SegmentId, end: SegmentEnd) -> Option<usize> {
        let index = self.slots.get(&segment)?[end.slot()];
        (index != usize::MAX).then_some(index)
    }

    /// 下标 `index` 处视口点的另一端。
    pub fn other(&self, index: usize) -> Option<&ViewportPoint> {
        let p = self.points.get(index)?;
        let other = self.position(p.segment, p.end.other())?;
        self.points.get(other)
    }
}

/// 为每条边的两个端点生成视口点，按极角升序排序。
pub fn build_viewport(segments: &Segments) -> Viewport {
    let mut points = Vec::with_capacity(segments.len() * 2);
    for id in segments.ids() {
        let segment = &segments[id].segment;
        points.push(ViewportPoint::new(segment.a, id, SegmentEnd::A));
        points.push(ViewportPoint::new(segment.b, id, SegmentEnd::B));
    }

    let viewport = Viewport::from_points(points);
    trace!(points = viewport.len(), "视口已排序");
    viewport
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::segment::{ResistorSegment, Segment};
    use crate::light::LightSource;
    use crate::preprocess::{relocate, resistor_edges};
    use crate::resistor::LightResistor;

    fn relocated_segments(resistor: &LightResistor, light: &LightSource) -> Segments {
        let mut segments = Segments::new();
        for (edge_index, edge) in resistor_edges(resistor) {
            segments.push(ResistorSegment {
                segment: relocate(&edge, light),
                resistor_index: 0,
                edge_index,
            });
        }
        segments
    }

    #[test]
    fn square_vertices_sorted_by_angle() {
        let resistor = LightResistor::from_vertices([
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 6.0),
            Point2::new(-2.0, 6.0),
            Point2::new(-2.0, 2.0),
        ]);
        let light = LightSource::new(0.0, 0.0, 100.0);
        let viewport = build_viewport(&relocated_segments(&resistor, &light));

        assert_eq!(viewport.len(), 8);
        let angles: Vec<f64> = viewport.iter().map(|p| p.angle).collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));

        // 每个顶点被相邻两条边各贡献一次。
        let expected = [
            (45.0, Point2::new(2.0, 2.0)),
            (71.56, Point2::new(2.0, 6.0)),
            (108.43, Point2::new(-2.0, 6.0)),
            (135.0, Point2::new(-2.0, 2.0)),
        ];
        for (i, (angle, point)) in expected.iter().enumerate() {
            for p in &viewport.as_slice()[i * 2..i * 2 + 2] {
                assert!((p.angle - angle).abs() < 0.01, "{} vs {}", p.angle, angle);
                assert_eq!(p.point, *point);
            }
        }
    }

    #[test]
    fn endpoints_are_mutually_linked() {
        let mut segments = Segments::new();
        let s0 = segments.push(ResistorSegment {
            segment: Segment::new(5.0, -1.0, 5.0, 1.0),
            resistor_index: 0,
            edge_index: 0,
        });
        let s1 = segments.push(ResistorSegment {
            segment: Segment::new(-3.0, 4.0, 0.0, 4.0),
            resistor_index: 0,
            edge_index: 1,
        });
        let viewport = build_viewport(&segments);

        assert_eq!(viewport.len(), 4);
        for index in 0..viewport.len() {
            let p = viewport.get(index).unwrap();
            let other = viewport.other(index).unwrap();
            assert_eq!(other.segment, p.segment);
            assert_eq!(other.end, p.end.other());
            let back = viewport.position(other.segment, other.end).unwrap();
            assert_eq!(viewport.other(back).unwrap(), p);
        }
        assert_eq!(viewport.get(0).unwrap().segment, s0);
        assert_eq!(viewport.get(0).unwrap().end, SegmentEnd::A);
        assert_eq!(viewport.get(3).unwrap().segment, s1);
        assert!(viewport.position(SegmentId(9), SegmentEnd::A).is_none());
    }
}
