use sketchpad_engine::camera::CameraParams;
use sketchpad_engine::device::GpuInit;
use sketchpad_engine::logging::LoggingConfig;
use sketchpad_engine::paint::Color;
use sketchpad_engine::window::RuntimeConfig;

use crate::shapes::{MAX_POINTS, STROKE_COLOR};

/// Everything the sketchpad can be tuned with, in one place.
#[derive(Debug, Clone)]
pub struct SketchConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,

    /// Initial camera placement.
    pub camera: CameraParams,
    pub max_points: usize,
    pub stroke: Color,
    /// Frame background.
    pub clear: Color,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
            camera: CameraParams::default(),
            max_points: MAX_POINTS,
            stroke: STROKE_COLOR,
            clear: Color::TRANSPARENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_engine::coords::Vec2;

    #[test]
    fn defaults_describe_the_classic_sketchpad() {
        let cfg = SketchConfig::default();
        assert_eq!(cfg.runtime.title, "sketchpad");
        assert_eq!(cfg.camera.extent, Vec2::new(20.0, 20.0));
        assert_eq!(cfg.max_points, 20);
        assert_eq!(cfg.stroke, Color::YELLOW);
        assert_eq!(cfg.clear, Color::TRANSPARENT);
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::Fifo);
    }
}
