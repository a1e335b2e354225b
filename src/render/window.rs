use kiss3d::camera::ArcBall;
use kiss3d::event::{Action, WindowEvent};
use kiss3d::light::Light;
use kiss3d::window::Window;
use log::{debug, trace};
use nalgebra::{Point3, Vector3};

use super::{RenderBackend, RenderError};
use crate::config::ViewerConfig;
use crate::formats::bounds::Bounds;
use crate::formats::PointCloud;

const DEFAULT_EYE: Point3<f32> = Point3 {
    coords: Vector3::new(0.0, 500.0, 1969.0),
};
const DEFAULT_AT: Point3<f32> = Point3 {
    coords: Vector3::new(300.0, 500.0, 200.0),
};
const FOV: f32 = std::f32::consts::PI / 4.0;

/// Draws the geometry into a kiss3d window with an arc-ball camera.
pub struct WindowBackend {
    config: ViewerConfig,
    window: Option<Window>,
    camera: ArcBall,
}

impl WindowBackend {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            window: None,
            camera: ArcBall::new_with_frustrum(FOV, 0.1, 4000.0, DEFAULT_EYE, DEFAULT_AT),
        }
    }

    fn window(&mut self) -> Result<&mut Window, RenderError> {
        self.window.as_mut().ok_or(RenderError::NoWindow)
    }
}

/// Camera looking at the center of `bounds` from far enough along +z to see all of it.
fn framing_camera(bounds: &Bounds) -> ArcBall {
    let at = bounds.center();
    let radius = (bounds.diagonal() / 2.0).max(1e-3);
    let distance = radius / (FOV / 2.0).tan() * 1.2;
    let eye = at + Vector3::new(0.0, 0.0, distance);
    ArcBall::new_with_frustrum(FOV, distance / 1000.0, distance * 10.0, eye, at)
}

impl RenderBackend for WindowBackend {
    fn create_window(&mut self) -> Result<(), RenderError> {
        let ViewerConfig {
            title,
            width,
            height,
            point_size,
            background_color: [r, g, b],
        } = &self.config;
        let mut window = Window::new_with_size(title, *width, *height);
        window.set_light(Light::StickToCamera);
        window.set_point_size(*point_size);
        window.set_background_color(*r, *g, *b);
        self.window = Some(window);
        Ok(())
    }

    fn add_geometry(&mut self, _geometry: &PointCloud) -> Result<(), RenderError> {
        // points are drawn immediately on every update_renderer, nothing to upload
        self.window()?;
        Ok(())
    }

    fn update_geometry(&mut self, geometry: &PointCloud) -> Result<(), RenderError> {
        self.window()?;
        trace!("geometry updated, {} points", geometry.len());
        Ok(())
    }

    fn reset_view_point(&mut self, bounds: Option<Bounds>) {
        if let Some(bounds) = bounds {
            self.camera = framing_camera(&bounds);
            debug!("camera framed on {:?}", bounds);
        }
    }

    fn poll_events(&mut self) -> Result<(), RenderError> {
        let window = self.window()?;
        for event in window.events().iter() {
            match event.value {
                WindowEvent::Key(key, Action::Press, _) => debug!("key {:?} pressed", key),
                WindowEvent::Close => debug!("window close requested"),
                _ => {}
            }
        }
        Ok(())
    }

    fn update_renderer(&mut self, geometry: &PointCloud) -> Result<(), RenderError> {
        let window = self.window.as_mut().ok_or(RenderError::NoWindow)?;
        for (position, color) in geometry.iter() {
            window.draw_point(position, color);
        }
        if !window.render_with_camera(&mut self.camera) {
            return Err(RenderError::WindowClosed);
        }
        Ok(())
    }
}
