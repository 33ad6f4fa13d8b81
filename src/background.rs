//! Decorative particle-field background.
//!
//! Everything here is independent of the browser: the scene math, the
//! [`Surface`] it draws on and the [`Host`] that schedules frames and delivers
//! resize notifications are all traits, so the whole mount / frame / resize /
//! teardown lifecycle can be driven from plain unit tests. The web-sys
//! implementations live in `app::browser`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackgroundError {
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("host error: {0}")]
    Host(String),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Tunables for the particle field. Every field falls back to its default when
/// omitted from a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub point_count: usize,
    /// Side length of the cube the points are scattered in.
    pub extent: f64,
    /// Radians added to both rotation axes every frame.
    pub rotation_step: f64,
    pub camera_depth: f64,
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub point_size: f64,
    pub color: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            point_count: 5000,
            extent: 2000.0,
            rotation_step: 0.0005,
            camera_depth: 1000.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            point_size: 2.0,
            color: "#ffffff".to_string(),
        }
    }
}

impl BackgroundConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.point_count == 0 {
            return Err("point_count must be positive");
        }
        if !(self.extent > 0.0) {
            return Err("extent must be positive");
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err("fov_degrees must be between 0 and 180");
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err("near must be positive and less than far");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1 for a degenerate viewport.
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

/// A fixed set of points spinning about the origin.
#[derive(Debug, Clone)]
pub struct ParticleField {
    points: Vec<[f64; 3]>,
    rotation: Rotation,
}

impl ParticleField {
    /// Scatters `count` points uniformly inside a cube of side `extent`
    /// centered on the origin.
    pub fn generate<R: Rng + ?Sized>(count: usize, extent: f64, rng: &mut R) -> Self {
        let half = extent / 2.0;
        let points = (0..count)
            .map(|_| {
                [
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                ]
            })
            .collect();
        Self {
            points,
            rotation: Rotation::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn advance(&mut self, step: f64) {
        self.rotation.x += step;
        self.rotation.y += step;
    }

    /// Points in world space after applying the current rotation in Euler XYZ
    /// order (`Rx * Ry * p`).
    pub fn rotated(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        let (sin_x, cos_x) = self.rotation.x.sin_cos();
        let (sin_y, cos_y) = self.rotation.y.sin_cos();
        self.points.iter().map(move |&[x, y, z]| {
            let x1 = x * cos_y + z * sin_y;
            let z1 = z * cos_y - x * sin_y;
            [x1, y * cos_x - z1 * sin_x, y * sin_x + z1 * cos_x]
        })
    }
}

/// Perspective camera on the positive z axis looking toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub depth: f64,
}

impl PerspectiveCamera {
    pub fn new(config: &BackgroundConfig, viewport: Viewport) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            depth: config.camera_depth,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Screen position of a world point and its distance from the camera, or
    /// `None` when it falls outside the view frustum.
    pub fn project(&self, point: [f64; 3], viewport: Viewport) -> Option<(f64, f64, f64)> {
        let distance = self.depth - point[2];
        if distance < self.near || distance > self.far {
            return None;
        }
        let focal = 1.0 / (self.fov_degrees.to_radians() / 2.0).tan();
        let ndc_x = focal / self.aspect * point[0] / distance;
        let ndc_y = focal * point[1] / distance;
        if ndc_x.abs() > 1.0 || ndc_y.abs() > 1.0 {
            return None;
        }
        Some((
            (ndc_x + 1.0) / 2.0 * viewport.width,
            (1.0 - ndc_y) / 2.0 * viewport.height,
            distance,
        ))
    }
}

/// Something the scene can be drawn onto.
pub trait Surface {
    fn size(&self) -> Viewport;
    fn set_size(&mut self, viewport: Viewport);
    /// Clears the surface and prepares to plot points in `color`.
    fn begin_frame(&mut self, color: &str);
    fn plot(&mut self, x: f64, y: f64, size: f64);
}

#[derive(Debug, Clone)]
pub struct ParticleScene {
    config: BackgroundConfig,
    field: ParticleField,
    camera: PerspectiveCamera,
}

impl ParticleScene {
    pub fn new<R: Rng + ?Sized>(config: BackgroundConfig, viewport: Viewport, rng: &mut R) -> Self {
        let field = ParticleField::generate(config.point_count, config.extent, rng);
        let camera = PerspectiveCamera::new(&config, viewport);
        Self {
            config,
            field,
            camera,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn resize<S: Surface>(&mut self, surface: &mut S, viewport: Viewport) {
        surface.set_size(viewport);
        self.camera.set_viewport(viewport);
    }

    /// Draws the field and returns how many points landed on screen.
    ///
    /// Point size is attenuated with distance: `point_size * (height / 2) /
    /// distance`, so nearer points are drawn larger.
    pub fn render<S: Surface>(&self, surface: &mut S) -> usize {
        let viewport = surface.size();
        let scale = viewport.height / 2.0;
        surface.begin_frame(&self.config.color);
        let mut plotted = 0;
        for point in self.field.rotated() {
            if let Some((x, y, distance)) = self.camera.project(point, viewport) {
                surface.plot(x, y, self.config.point_size * scale / distance);
                plotted += 1;
            }
        }
        plotted
    }

    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> usize {
        self.field.advance(self.config.rotation_step);
        self.render(surface)
    }
}

pub type FrameCallback = Box<dyn FnOnce()>;
pub type ResizeCallback = Box<dyn FnMut(Viewport)>;

/// The environment a background is mounted into.
///
/// `Frame` and `Listener` are the handles needed to cancel a scheduled frame
/// and to deregister a resize listener.
pub trait Host {
    type Surface: Surface;
    type Frame;
    type Listener;

    fn surface(&self) -> Option<Self::Surface>;
    fn viewport(&self) -> Viewport;
    fn request_frame(&self, callback: FrameCallback) -> Result<Self::Frame, BackgroundError>;
    fn cancel_frame(&self, frame: Self::Frame);
    fn listen_resize(&self, callback: ResizeCallback) -> Result<Self::Listener, BackgroundError>;
    fn unlisten_resize(&self, listener: Self::Listener);
}

struct Running<H: Host> {
    scene: ParticleScene,
    surface: H::Surface,
    frame: Option<H::Frame>,
    active: bool,
}

/// A mounted particle background.
///
/// Owns the scene, the drawing surface, the pending frame handle and the
/// resize listener. Dropping it cancels the frame and removes the listener.
pub struct ParticleBackground<H: Host + 'static> {
    host: Rc<H>,
    running: Rc<RefCell<Running<H>>>,
    listener: Option<H::Listener>,
}

impl<H: Host + 'static> ParticleBackground<H> {
    pub fn mount<R: Rng + ?Sized>(
        host: Rc<H>,
        config: BackgroundConfig,
        rng: &mut R,
    ) -> Result<Self, BackgroundError> {
        config.validate().map_err(BackgroundError::InvalidConfig)?;
        let mut surface = host.surface().ok_or(BackgroundError::SurfaceUnavailable)?;
        let viewport = host.viewport();
        surface.set_size(viewport);
        let scene = ParticleScene::new(config, viewport, rng);
        let running = Rc::new(RefCell::new(Running {
            scene,
            surface,
            frame: None,
            active: true,
        }));

        let weak = Rc::downgrade(&running);
        let listener = host.listen_resize(Box::new(move |viewport| {
            let Some(running) = weak.upgrade() else {
                return;
            };
            let mut state = running.borrow_mut();
            let Running { scene, surface, .. } = &mut *state;
            scene.resize(surface, viewport);
        }))?;

        let background = Self {
            host,
            running,
            listener: Some(listener),
        };
        // on failure the listener is released by Drop
        schedule(&background.host, &background.running)?;
        Ok(background)
    }

    pub fn point_count(&self) -> usize {
        self.running.borrow().scene.field().len()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        let state = self.running.borrow();
        state.active && state.frame.is_some()
    }

    #[cfg(test)]
    fn with_scene<T>(&self, f: impl FnOnce(&ParticleScene) -> T) -> T {
        f(&self.running.borrow().scene)
    }

    #[cfg(test)]
    fn teardown(self) {
        drop(self);
    }

    fn release(&mut self) {
        let frame = {
            let mut state = self.running.borrow_mut();
            state.active = false;
            state.frame.take()
        };
        if let Some(frame) = frame {
            self.host.cancel_frame(frame);
        }
        if let Some(listener) = self.listener.take() {
            self.host.unlisten_resize(listener);
        }
    }
}

impl<H: Host + 'static> Drop for ParticleBackground<H> {
    fn drop(&mut self) {
        self.release();
    }
}

fn schedule<H: Host + 'static>(
    host: &Rc<H>,
    running: &Rc<RefCell<Running<H>>>,
) -> Result<(), BackgroundError> {
    let weak_host: Weak<H> = Rc::downgrade(host);
    let weak_running = Rc::downgrade(running);
    let frame = host.request_frame(Box::new(move || {
        let (Some(host), Some(running)) = (weak_host.upgrade(), weak_running.upgrade()) else {
            return;
        };
        {
            let mut state = running.borrow_mut();
            if !state.active {
                return;
            }
            state.frame = None;
            let Running { scene, surface, .. } = &mut *state;
            scene.tick(surface);
        }
        if let Err(err) = schedule(&host, &running) {
            log::warn!("particle background stopped: {err}");
        }
    }))?;
    running.borrow_mut().frame = Some(frame);
    Ok(())
}
