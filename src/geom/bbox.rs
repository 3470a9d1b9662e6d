use crate::geom::point::Point2;

/// 轴对齐包围盒，y 轴向上：`top >= bottom`，`right >= left`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box2 {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Box2 {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// 点集的最小包围盒；空点集返回 `None`。
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bbox.left = bbox.left.min(p.x);
            bbox.right = bbox.right.max(p.x);
            bbox.top = bbox.top.max(p.y);
            bbox.bottom = bbox.bottom.min(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    pub fn top_left(&self) -> Point2 {
        Point2::new(self.left, self.top)
    }

    /// 盒内（含边界）离 `p` 最近的点；`p` 在盒内时返回 `p` 本身。
    pub fn closest_point(&self, p: Point2) -> Point2 {
        Point2::new(
            p.x.clamp(self.left, self.right),
            p.y.clamp(self.bottom, self.top),
        )
    }
}
