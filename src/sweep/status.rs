//! 活动边集合（open edges）：当前扫描射线穿过的边。
//!
//! 以“端点切换”的方式维护：
//! - 遇到一个视口点时，若同一条边的另一端已在集合中，说明该边在此处结束，移除；
//! - 否则该边在此处开始，记录本端点；
//! - 若本端点已经在集合中，说明拓扑里有重复边/自邻接边，返回 `Toggle::AlreadyOpen`，
//!   集合保持不变（由调用方记告警）。

use std::collections::BTreeMap;

use crate::geom::segment::SegmentId;
use crate::sweep::viewport::{SegmentEnd, ViewportPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    Closed,
    AlreadyOpen,
}

/// `SegmentId -> 打开该边的端点`。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenEdges {
    open: BTreeMap<SegmentId, SegmentEnd>,
}

impl OpenEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.open.contains_key(&id)
    }

    /// 打开该边的端点（若已打开）。
    pub fn opened_by(&self, id: SegmentId) -> Option<SegmentEnd> {
        self.open.get(&id).copied()
    }

    /// 直接登记一条已打开的边（用于起始动作预置）。
    pub fn seed(&mut self, id: SegmentId, end: SegmentEnd) -> Toggle {
        match self.open.get(&id) {
            Some(_) => Toggle::AlreadyOpen,
            None => {
                self.open.insert(id, end);
                Toggle::Opened
            }
        }
    }

    pub fn toggle(&mut self, point: &ViewportPoint) -> Toggle {
        match self.open.get(&point.segment) {
            Some(end) if *end == point.end => Toggle::AlreadyOpen,
            Some(_) => {
                self.open.remove(&point.segment);
                Toggle::Closed
            }
            None => {
                self.open.insert(point.segment, point.end);
                Toggle::Opened
            }
        }
    }

    /// 按 `SegmentId` 升序列出活动边。
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.open.keys().copied()
    }

    pub fn snapshot_order(&self) -> Vec<SegmentId> {
        self.ids().collect()
    }
}
