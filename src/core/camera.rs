use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Easing curves for camera moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            // Smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// An in-flight move of the camera from one center/zoom to another
#[derive(Debug, Clone)]
pub struct CameraAnimation {
    start_time: Instant,
    duration: Duration,
    easing: EasingType,
    from_center: LatLng,
    to_center: LatLng,
    from_zoom: f64,
    to_zoom: f64,
}

impl CameraAnimation {
    pub fn new(
        from: &Viewport,
        to_center: LatLng,
        to_zoom: f64,
        duration: Duration,
        easing: EasingType,
        start_time: Instant,
    ) -> Self {
        Self {
            start_time,
            duration,
            easing,
            from_center: from.center,
            to_center,
            from_zoom: from.zoom,
            to_zoom,
        }
    }

    /// Eased progress in `[0, 1]` at `now`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= self.duration
    }

    /// Center and zoom the camera should show at `now`
    pub fn sample(&self, now: Instant) -> (LatLng, f64) {
        let t = self.progress(now);
        let center = LatLng::new(
            lerp(self.from_center.lat, self.to_center.lat, t),
            lerp(self.from_center.lng, self.to_center.lng, t),
        );
        (center, lerp(self.from_zoom, self.to_zoom, t))
    }

    pub fn target(&self) -> (LatLng, f64) {
        (self.to_center, self.to_zoom)
    }
}

/// Camera settings taken from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMotion {
    pub duration: Duration,
    pub easing: EasingType,
    /// Pixels kept free around framed bounds
    pub fit_padding: f64,
}

/// The map camera: a viewport plus an optional animation towards a new view
#[derive(Debug, Clone)]
pub struct Camera {
    viewport: Viewport,
    animation: Option<CameraAnimation>,
    motion: CameraMotion,
}

impl Camera {
    pub fn new(viewport: Viewport, motion: CameraMotion) -> Self {
        Self {
            viewport,
            animation: None,
            motion,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Where the camera ends up once the current animation finishes
    pub fn target(&self) -> (LatLng, f64) {
        match &self.animation {
            Some(animation) => animation.target(),
            None => (self.viewport.center, self.viewport.zoom),
        }
    }

    /// Starts an animated move that frames `bounds`
    pub fn animate_to_bounds(&mut self, bounds: &LatLngBounds, now: Instant) {
        let zoom = self
            .viewport
            .zoom_for_bounds(bounds, self.motion.fit_padding);
        self.animate_to(bounds.center(), zoom, now);
    }

    pub fn animate_to(&mut self, center: LatLng, zoom: f64, now: Instant) {
        let zoom = zoom.clamp(self.viewport.min_zoom, self.viewport.max_zoom);
        log::debug!(
            "camera: animating to ({:.5}, {:.5}) @ z{:.2}",
            center.lat,
            center.lng,
            zoom
        );
        self.animation = Some(CameraAnimation::new(
            &self.viewport,
            center,
            zoom,
            self.motion.duration,
            self.motion.easing,
            now,
        ));
    }

    /// Advances the animation; returns true while the camera is still moving
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };

        let finished = animation.is_finished(now);
        let (center, zoom) = if finished {
            animation.target()
        } else {
            animation.sample(now)
        };
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if finished {
            self.animation = None;
        }
        !finished
    }

    /// Direct manipulation cancels any running animation
    pub fn pan(&mut self, delta: Point) {
        self.animation = None;
        self.viewport.pan(delta);
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        self.animation = None;
        self.viewport.zoom_to(zoom, focus_point);
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }
}
