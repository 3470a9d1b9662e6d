use core::fmt;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::geom::point::Point2;
use crate::geom::segment::{ResistorSegment, Segment, SegmentId, Segments};
use crate::light::LightSource;
use crate::resistor::LightResistor;

#[derive(Clone, Debug, PartialEq)]
pub enum WarningKind {
    DroppedNonFinite,
    DroppedZeroLength,
    DroppedDuplicate { kept: SegmentId },
    /// 扫描时遇到已在活动集合中的端点（重复边/自邻接拓扑），该次切换被跳过。
    DuplicateTopology { segment: SegmentId, angle: f64 },
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::DroppedNonFinite => write!(f, "已丢弃：边的坐标不是有限浮点数"),
            WarningKind::DroppedZeroLength => write!(f, "已丢弃：零长度边"),
            WarningKind::DroppedDuplicate { kept } => {
                write!(f, "已丢弃：与线段 {} 重合", kept.0)
            }
            WarningKind::DuplicateTopology { segment, angle } => {
                write!(
                    f,
                    "线段 {} 的端点（角度 {:.4}）已在活动集合中，已跳过",
                    segment.0, angle
                )
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    pub resistor_index: usize,
    pub edge_index: usize,
    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "第 {} 个遮挡体第 {} 条边：{}",
            self.resistor_index, self.edge_index, self.kind
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct PreprocessOutput {
    /// 以光源为原点、已延长的边。
    pub segments: Segments,
    pub warnings: Vec<Warning>,
}

/// 无方向的边键：两个端点按位表示排序后组成，用于判重。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EdgeKey {
    a: (u64, u64),
    b: (u64, u64),
}

impl EdgeKey {
    fn new(segment: &Segment) -> Self {
        // `+ 0.0` 把 -0.0 归一为 0.0，避免同一坐标得到两个键。
        let bits = |p: Point2| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        let (mut a, mut b) = (bits(segment.a), bits(segment.b));
        if b < a {
            core::mem::swap(&mut a, &mut b);
        }
        Self { a, b }
    }
}

/// 把遮挡体的顶点环展开为边：`v[i] -> v[i+1]`，仅当顶点数 `>= 3` 时追加闭合边
/// `v[n-1] -> v[0]`。返回 `(边序号, 边)`，坐标仍是世界坐标。
pub fn resistor_edges(resistor: &LightResistor) -> impl Iterator<Item = (usize, Segment)> + '_ {
    let vertices = resistor.vertices();
    let n = vertices.len();
    let edge_count = match n {
        0 | 1 => 0,
        2 => 1,
        _ => n,
    };
    (0..edge_count).map(move |i| (i, Segment::from_points(vertices[i], vertices[(i + 1) % n])))
}

/// 平移到以光源为原点的坐标系。
pub fn relocate(segment: &Segment, light: &LightSource) -> Segment {
    segment.translated(-light.x, -light.y)
}

/// 沿边自身方向延长：总长度增加 `factor` 倍，两端各一半。
pub fn expand(segment: &Segment, factor: f64) -> Segment {
    segment.resized(factor)
}

/// 把已筛选的遮挡体转换为扫描用的边集合：
/// 展开顶点环 → 丢弃非有限/零长度/重复边（产生告警）→ 平移到光源坐标系 → 延长 `expansion`。
///
/// 说明：
/// - `near` 为遮挡体下标（通常来自 `near::near_resistors`），告警中的 `resistor_index`
///   即该下标；
/// - 判重在世界坐标上进行，忽略方向；保留先出现的一条。
pub fn build_segments(
    resistors: &[LightResistor],
    near: &[usize],
    light: &LightSource,
    expansion: f64,
) -> PreprocessOutput {
    let mut segments = Segments::new();
    let mut warnings = Vec::new();
    let mut seen: BTreeMap<EdgeKey, SegmentId> = BTreeMap::new();

    for &resistor_index in near {
        let Some(resistor) = resistors.get(resistor_index) else {
            continue;
        };

        for (edge_index, edge) in resistor_edges(resistor) {
            let mut report = |kind: WarningKind| {
                warn!(resistor_index, edge_index, "{}", kind);
                warnings.push(Warning {
                    resistor_index,
                    edge_index,
                    kind,
                });
            };

            if !edge.is_finite() {
                report(WarningKind::DroppedNonFinite);
                continue;
            }
            if edge.a == edge.b {
                report(WarningKind::DroppedZeroLength);
                continue;
            }

            let key = EdgeKey::new(&edge);
            if let Some(kept) = seen.get(&key) {
                report(WarningKind::DroppedDuplicate { kept: *kept });
                continue;
            }

            let id = segments.push(ResistorSegment {
                segment: expand(&relocate(&edge, light), expansion),
                resistor_index,
                edge_index,
            });
            seen.insert(key, id);
        }
    }

    debug!(
        resistors = near.len(),
        segments = segments.len(),
        dropped = warnings.len(),
        "边集合已构建"
    );

    PreprocessOutput { segments, warnings }
}
