use tracing::debug;

use crate::geom::point::Point2;
use crate::light::{LightSource, LightSourceError};
use crate::near::near_resistors;
use crate::options::{OptionsError, SweepOptions};
use crate::preprocess::{Warning, build_segments};
use crate::resistor::LightResistor;
use crate::sweep::rays::assemble;
use crate::sweep::start::{SeedError, start_actions};
use crate::sweep::viewport::build_viewport;
use crate::sweep::visibility::Sweep;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LightError {
    #[error(transparent)]
    Light(#[from] LightSourceError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

#[derive(Clone, Debug, Default)]
pub struct VisibilityOutput {
    /// 可见区域多边形顶点（世界坐标），按相对光源的极角升序。
    pub polygon: Vec<Point2>,
    /// 预处理与扫描过程中收集的告警，按产生顺序排列。
    pub warnings: Vec<Warning>,
    /// 参与计算的遮挡体数量（近邻筛选之后）。
    pub near_resistors: usize,
    /// 参与扫描的边数量（丢弃退化边之后）。
    pub segments: usize,
}

/// 一站式入口：近邻筛选 + 边集合 + 视口 + 起始动作 + 扫描采样。
pub fn compute_visibility(
    resistors: &[LightResistor],
    light: &LightSource,
    options: &SweepOptions,
) -> Result<VisibilityOutput, LightError> {
    light.validate()?;
    options.validate()?;

    let near = near_resistors(resistors, light);
    let preprocess = build_segments(resistors, &near, light, options.segment_expansion);
    let viewport = build_viewport(&preprocess.segments);
    let start = start_actions(&preprocess.segments, &viewport, light.intensity)?;

    let mut sweep = Sweep::new(
        &preprocess.segments,
        &viewport,
        &start,
        options.segment_expansion,
    );
    let relative = assemble(&mut sweep, light.intensity, options);
    let sweep_warnings = sweep.into_warnings();

    let polygon: Vec<Point2> = relative
        .into_iter()
        .map(|p| p.translated(light.x, light.y))
        .collect();

    let segments = preprocess.segments.len();
    let mut warnings = preprocess.warnings;
    warnings.extend(sweep_warnings);

    debug!(
        near = near.len(),
        segments,
        vertices = polygon.len(),
        warnings = warnings.len(),
        "可见区域计算完成"
    );

    Ok(VisibilityOutput {
        polygon,
        warnings,
        near_resistors: near.len(),
        segments,
    })
}
