//! 近距遮挡体筛选：只保留包围盒可能落入光照半径的遮挡体。
//!
//! 这是保守判定（宁多勿漏）：误收的遮挡体会在后续求交阶段被自然排除。

use tracing::trace;

use crate::light::LightSource;
use crate::resistor::LightResistor;

/// 返回可能投下阴影的遮挡体下标（按输入顺序）。
///
/// 判定步骤（对每个遮挡体）：
/// 1. 左上角到光源距离 `dist`，包围盒对角线 `d`；
/// 2. `dist - d > intensity`：整个盒子都在半径外，跳过；
/// 3. `dist <= intensity`：直接收下；
/// 4. 否则取盒内离光源最近的点，落在半径内即收下（盒子与光照圆相交，不要求有角在圆内）。
pub fn near_resistors(resistors: &[LightResistor], light: &LightSource) -> Vec<usize> {
    let source = light.position();
    let mut out = Vec::new();

    for (index, resistor) in resistors.iter().enumerate() {
        let Some(bbox) = resistor.bounding_box() else {
            continue;
        };

        let distance = bbox.top_left().distance_to(source);
        if distance - bbox.diagonal() > light.intensity {
            trace!(index, distance, "遮挡体在光照半径外");
            continue;
        }

        if distance <= light.intensity {
            out.push(index);
            continue;
        }

        if light.reaches(bbox.closest_point(source)) {
            out.push(index);
        }
    }

    out
}
