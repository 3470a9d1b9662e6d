use std::sync::OnceLock;

use crate::geom::bbox::Box2;
use crate::geom::point::Point2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResistorError {
    #[error("遮挡体没有顶点")]
    Empty,
    #[error("第 {index} 个顶点坐标不是有限浮点数")]
    NonFiniteVertex { index: usize },
}

/// 遮挡体（light resistor）：按插入顺序排列的顶点环，不透光。
///
/// 说明：
/// - 顶点数 `>= 3` 时视为闭合多边形（含最后一个顶点回到第一个顶点的边）；
/// - 顶点顺序即边的绕向；不检查自相交；
/// - 包围盒惰性计算并缓存，任何顶点修改都会清空缓存，下次读取时重建。
#[derive(Clone, Debug, Default)]
pub struct LightResistor {
    vertices: Vec<Point2>,
    bbox: OnceLock<Option<Box2>>,
}

impl LightResistor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Point2>,
    {
        Self {
            vertices: vertices.into_iter().collect(),
            bbox: OnceLock::new(),
        }
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn add_vertex(&mut self, point: Point2) {
        self.vertices.push(point);
        self.invalidate();
    }

    pub fn add_vertices<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point2>,
    {
        self.vertices.extend(points);
        self.invalidate();
    }

    /// 替换第 `index` 个顶点；越界返回 `false` 且不修改。
    pub fn set_vertex(&mut self, index: usize, point: Point2) -> bool {
        let Some(slot) = self.vertices.get_mut(index) else {
            return false;
        };
        *slot = point;
        self.invalidate();
        true
    }

    /// 整体平移（例如宿主场景中物体移动了一帧）。
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            *v = v.translated(dx, dy);
        }
        self.invalidate();
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.invalidate();
    }

    /// 顶点的包围盒；没有顶点时为 `None`。
    pub fn bounding_box(&self) -> Option<Box2> {
        *self
            .bbox
            .get_or_init(|| Box2::from_points(self.vertices.iter().copied()))
    }

    pub fn is_bbox_cached(&self) -> bool {
        self.bbox.get().is_some()
    }

    /// 边界校验：至少一个顶点，且所有坐标均为有限值。
    pub fn validate(&self) -> Result<(), ResistorError> {
        if self.vertices.is_empty() {
            return Err(ResistorError::Empty);
        }
        if let Some(index) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(ResistorError::NonFiniteVertex { index });
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.bbox = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> LightResistor {
        LightResistor::from_vertices([
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 6.0),
            Point2::new(-2.0, 6.0),
            Point2::new(-2.0, 2.0),
        ])
    }

    #[test]
    fn bbox_is_cached_until_mutation() {
        let mut r = square();
        assert!(!r.is_bbox_cached());
        assert_eq!(r.bounding_box(), Some(Box2::new(-2.0, 6.0, 2.0, 2.0)));
        assert!(r.is_bbox_cached());

        r.add_vertex(Point2::new(0.0, -4.0));
        assert!(!r.is_bbox_cached());
        assert_eq!(r.bounding_box(), Some(Box2::new(-2.0, 6.0, 2.0, -4.0)));

        assert!(r.set_vertex(0, Point2::new(5.0, 2.0)));
        assert!(!r.is_bbox_cached());
        assert_eq!(r.bounding_box().unwrap().right, 5.0);
        assert!(!r.set_vertex(99, Point2::ORIGIN));
        assert!(r.is_bbox_cached());

        r.translate(1.0, 1.0);
        assert_eq!(r.bounding_box(), Some(Box2::new(-1.0, 7.0, 6.0, -3.0)));
    }

    #[test]
    fn empty_resistor_has_no_bbox() {
        let mut r = square();
        r.clear();
        assert_eq!(r.bounding_box(), None);
        assert_eq!(r.validate(), Err(ResistorError::Empty));
    }

    #[test]
    fn rejects_non_finite_vertex() {
        let mut r = square();
        r.add_vertices([Point2::new(1.0, f64::NAN)]);
        assert_eq!(r.validate(), Err(ResistorError::NonFiniteVertex { index: 4 }));
        assert!(square().validate().is_ok());
    }
}
