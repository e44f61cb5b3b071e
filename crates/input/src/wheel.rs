//! Scroll-wheel input mapped onto virtual 0–100 sliders.
//!
//! The sliders are independent of any on-screen control: wheel ticks nudge
//! an accumulator and the view value is derived from it on a log scale.

/// Slider position change per wheel event.
pub const WHEEL_STEP: f64 = 0.5;
/// Zoom slider start position (scale 1.0).
pub const ZOOM_SLIDER_START: f64 = 50.0;
/// Time slider start position (speed 1.0).
pub const TIME_SLIDER_START: f64 = 55.0;

/// Scale for a zoom slider position: `10^((50 - v) / 25)`.
pub fn zoom_scale(slider: f64) -> f64 {
    10f64.powf((50.0 - slider) / 25.0)
}

/// Time speed for a time slider position: `10^((v - 55) / 30)`.
pub fn time_speed(slider: f64) -> f64 {
    10f64.powf((slider - 55.0) / 30.0)
}

/// Zoom slider position that yields `scale`. Non-positive scales map to the start.
pub fn zoom_slider_for(scale: f64) -> f64 {
    slider_for(scale, ZOOM_SLIDER_START, |log| ZOOM_SLIDER_START - 25.0 * log)
}

/// Time slider position that yields `speed`. Non-positive speeds map to the start.
pub fn time_slider_for(speed: f64) -> f64 {
    slider_for(speed, TIME_SLIDER_START, |log| TIME_SLIDER_START + 30.0 * log)
}

fn slider_for(value: f64, start: f64, position: impl Fn(f64) -> f64) -> f64 {
    if !(value.is_finite() && value > 0.0) {
        return start;
    }
    position(value.log10()).clamp(0.0, 100.0)
}

/// A 0–100 accumulator nudged by wheel events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualSlider {
    value: f64,
}

impl VirtualSlider {
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value.clamp(0.0, 100.0);
    }

    /// Step down for negative `delta`, up otherwise.
    pub fn nudge(&mut self, delta: f64) -> f64 {
        let step = if delta < 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
        self.set(self.value + step);
        self.value
    }
}

/// One wheel event in canvas terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub shift: bool,
}

impl WheelInput {
    pub fn vertical(delta_y: f64) -> Self {
        Self {
            delta_y,
            ..Default::default()
        }
    }

    pub fn horizontal(delta_x: f64) -> Self {
        Self {
            delta_x,
            ..Default::default()
        }
    }

    /// Shift+wheel and sideways trackpad scrolls steer time instead of zoom.
    pub fn is_horizontal(&self) -> bool {
        self.shift || self.delta_x.abs() > self.delta_y.abs()
    }

    /// The delta that drives the time slider.
    pub fn time_delta(&self) -> f64 {
        if self.delta_x != 0.0 {
            self.delta_x
        } else {
            self.delta_y
        }
    }
}
