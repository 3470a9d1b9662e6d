pub mod algorithm;
pub mod geom;
pub mod light;
pub mod near;
pub mod options;
pub mod preprocess;
pub mod resistor;
pub mod run;
pub mod sweep;

pub use algorithm::{LightingAlgorithm, SweepLightAlgorithm};
pub use geom::point::Point2;
pub use light::{LightSource, LightSourceError};
pub use options::{OptionsError, SweepOptions};
pub use preprocess::{Warning, WarningKind};
pub use resistor::{LightResistor, ResistorError};
pub use run::{LightError, VisibilityOutput, compute_visibility};
