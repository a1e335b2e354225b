//! Frame by frame playback.
//!
//! [Viewer] owns the frame on screen and decides when the camera is framed; a
//! [RenderBackend] does the drawing. [WindowBackend] draws into a kiss3d window.

#[cfg(test)]
pub(crate) mod recording;
mod viewer;
mod window;

use thiserror::Error;

use crate::formats::bounds::Bounds;
use crate::formats::{PointCloud, PointCloudError};

pub use viewer::{Viewer, ViewerState};
pub use window::WindowBackend;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("the viewer window has been closed")]
    WindowClosed,
    #[error("no window has been created yet")]
    NoWindow,
    #[error(transparent)]
    Geometry(#[from] PointCloudError),
}

/// Operations a viewer needs from whatever draws the points.
pub trait RenderBackend {
    /// Opens the window. Called once, before anything else.
    fn create_window(&mut self) -> Result<(), RenderError>;

    /// Registers the single geometry the viewer keeps updating.
    fn add_geometry(&mut self, geometry: &PointCloud) -> Result<(), RenderError>;

    /// The bound geometry has new contents.
    fn update_geometry(&mut self, geometry: &PointCloud) -> Result<(), RenderError>;

    /// Points the camera at the given bounds. `None` when the geometry is empty.
    fn reset_view_point(&mut self, bounds: Option<Bounds>);

    /// Handles pending input events.
    fn poll_events(&mut self) -> Result<(), RenderError>;

    /// Draws the geometry and presents the frame.
    fn update_renderer(&mut self, geometry: &PointCloud) -> Result<(), RenderError>;
}
