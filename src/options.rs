/// 扫描算法的可调参数。
///
/// 约定：
/// - 参数在进入扫描前统一校验（`validate`），非法值直接报错，不做静默修正；
/// - 默认值即常规光照场景使用的取值。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepOptions {
    /// 无遮挡时光照多边形由多少段组成；采样角间距为 `360 / parts_num` 度。
    pub parts_num: usize,
    /// 在可见的边界端点两侧补射的光线偏角（度），用于得到清晰的阴影边缘。
    pub edge_epsilon_degrees: f64,
    /// 每条遮挡边沿自身方向延长的比例（总长度的比例，两端各一半），
    /// 用于闭合相邻边之间的浮点缝隙。
    pub segment_expansion: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            parts_num: 32,
            edge_epsilon_degrees: 0.01,
            segment_expansion: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("采样段数 parts_num 必须为正整数")]
    ZeroParts,
    #[error("边缘偏角必须是 (0, 1) 度内的有限数，实际为 {value}")]
    InvalidEpsilon { value: f64 },
    #[error("边延长比例必须是 [0, 1) 内的有限数，实际为 {value}")]
    InvalidExpansion { value: f64 },
}

impl SweepOptions {
    pub fn with_parts_num(mut self, parts_num: usize) -> Self {
        self.parts_num = parts_num;
        self
    }

    /// 采样光线的角间距（度）。
    pub fn delta_degrees(&self) -> f64 {
        360.0 / self.parts_num as f64
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.parts_num == 0 {
            return Err(OptionsError::ZeroParts);
        }
        let eps = self.edge_epsilon_degrees;
        if !eps.is_finite() || eps <= 0.0 || eps >= 1.0 {
            return Err(OptionsError::InvalidEpsilon { value: eps });
        }
        let expansion = self.segment_expansion;
        if !expansion.is_finite() || !(0.0..1.0).contains(&expansion) {
            return Err(OptionsError::InvalidExpansion { value: expansion });
        }
        Ok(())
    }
}
