use crate::geom::intersection::intersect_segments;
use crate::geom::point::Point2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub usize);

/// 有限线段 `a -> b`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a: Point2::new(x1, y1),
            b: Point2::new(x2, y2),
        }
    }

    pub const fn from_points(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    pub fn point_at(&self, t: f64) -> Point2 {
        self.a + (self.b - self.a).scaled(t)
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        intersect_segments(self, other).is_some()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            a: self.a.translated(dx, dy),
            b: self.b.translated(dx, dy),
        }
    }

    /// 沿线段自身方向向外延长：总长度增加 `factor` 倍，两端各延长一半。
    ///
    /// 用于让本应首尾相接、但因浮点误差留有缝隙的相邻边略微重叠。
    /// 零长度线段原样返回。
    pub fn resized(&self, factor: f64) -> Self {
        let d = (self.b - self.a).scaled(factor * 0.5);
        Self {
            a: self.a - d,
            b: self.b + d,
        }
    }
}

/// 来自某个遮挡体的一条边。
///
/// `resistor_index` / `edge_index` 记录来源（遮挡体在输入中的下标、顶点环中的边序号），
/// 用于告警定位。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResistorSegment {
    pub segment: Segment,
    pub resistor_index: usize,
    pub edge_index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Segments {
    segments: Vec<ResistorSegment>,
}

impl Segments {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: SegmentId) -> &ResistorSegment {
        &self.segments[id.0]
    }

    pub fn try_get(&self, id: SegmentId) -> Option<&ResistorSegment> {
        self.segments.get(id.0)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ResistorSegment> {
        self.segments.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        (0..self.segments.len()).map(SegmentId)
    }

    /// 追加一条边并返回其 `SegmentId`。
    pub fn push(&mut self, segment: ResistorSegment) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(segment);
        id
    }

    /// 所有端点到原点的最大距离（空集合为 `0`）。
    pub fn max_endpoint_distance(&self) -> f64 {
        self.segments
            .iter()
            .flat_map(|s| [s.segment.a.length(), s.segment.b.length()])
            .fold(0.0, f64::max)
    }
}

impl core::ops::Index<SegmentId> for Segments {
    type Output = ResistorSegment;

    fn index(&self, index: SegmentId) -> &Self::Output {
        self.get(index)
    }
}
