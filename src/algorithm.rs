//! 光照算法的对外接口。

use tracing::debug;

use crate::light::LightSource;
use crate::options::{OptionsError, SweepOptions};
use crate::resistor::{LightResistor, ResistorError};
use crate::run::{LightError, VisibilityOutput, compute_visibility};

/// 可替换的光照算法：给定光源，返回可见区域多边形。
pub trait LightingAlgorithm {
    fn compute_visibility_polygon(&self, light: &LightSource) -> Result<VisibilityOutput, LightError>;
}

/// 基于角度扫描的光照算法，持有场景中的全部遮挡体。
#[derive(Clone, Debug, Default)]
pub struct SweepLightAlgorithm {
    resistors: Vec<LightResistor>,
    options: SweepOptions,
}

impl SweepLightAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SweepOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self {
            resistors: Vec::new(),
            options,
        })
    }

    /// 添加遮挡体，返回它的下标（告警中的 `resistor_index`）。
    pub fn add_resistor(&mut self, resistor: LightResistor) -> Result<usize, ResistorError> {
        resistor.validate()?;
        self.resistors.push(resistor);
        let index = self.resistors.len() - 1;
        debug!(index, vertices = self.resistors[index].len(), "已添加遮挡体");
        Ok(index)
    }

    pub fn resistors(&self) -> &[LightResistor] {
        &self.resistors
    }

    /// 直接修改某个遮挡体；其包围盒缓存由 `LightResistor` 自行失效。
    pub fn resistor_mut(&mut self, index: usize) -> Option<&mut LightResistor> {
        self.resistors.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.resistors.clear();
    }

    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    pub fn parts_num(&self) -> usize {
        self.options.parts_num
    }

    pub fn set_parts_num(&mut self, parts_num: usize) -> Result<(), OptionsError> {
        let options = self.options.with_parts_num(parts_num);
        options.validate()?;
        self.options = options;
        Ok(())
    }
}

impl LightingAlgorithm for SweepLightAlgorithm {
    fn compute_visibility_polygon(&self, light: &LightSource) -> Result<VisibilityOutput, LightError> {
        compute_visibility(&self.resistors, light, &self.options)
    }
}
