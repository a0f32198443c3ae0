use rand::Rng;
use serde::Deserialize;

use crate::types::Vector2D;

/// A joystick-like source reporting deflection on two axes.
pub trait InputDevice {
    fn read(&mut self) -> Vector2D;
}

/// How readings from several connected devices are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Per-axis sum, clamped to the deflection range.
    #[default]
    Sum,
    Average,
    /// Only the first connected device steers.
    First,
}

pub struct InputAdapter {
    devices: Vec<Box<dyn InputDevice>>,
    aggregation: Aggregation,
    max_deflection: i32,
}

impl InputAdapter {
    pub fn new(aggregation: Aggregation, max_deflection: i32) -> Self {
        InputAdapter { devices: Vec::new(), aggregation, max_deflection }
    }

    pub fn connect(&mut self, device: Box<dyn InputDevice>) {
        self.devices.push(device);
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Summary deflection across every connected device.
    ///
    /// With nothing connected this falls back to a uniformly random integer
    /// vector in `[-max, max]` on both axes, drawn from `rng`.
    pub fn summary_status(&mut self, rng: &mut impl Rng) -> Vector2D {
        let limit = self.max_deflection as f64;
        if self.devices.is_empty() {
            let x = rng.gen_range(-self.max_deflection..=self.max_deflection);
            let y = rng.gen_range(-self.max_deflection..=self.max_deflection);
            return Vector2D::new(x as f64, y as f64);
        }

        match self.aggregation {
            Aggregation::Sum => self
                .devices
                .iter_mut()
                .fold(Vector2D::ZERO, |acc, device| acc.add(device.read()))
                .clamp_axes(limit),
            Aggregation::Average => {
                let count = self.devices.len() as f64;
                self.devices
                    .iter_mut()
                    .fold(Vector2D::ZERO, |acc, device| acc.add(device.read()))
                    .scale(1.0 / count)
                    .clamp_axes(limit)
            }
            Aggregation::First => self.devices[0].read().clamp_axes(limit),
        }
    }
}
