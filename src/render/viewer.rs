use log::{debug, trace, warn};

use super::{RenderBackend, RenderError};
use crate::formats::PointCloud;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    /// No window, no geometry.
    Uninitialized,
    /// Window open with one geometry bound.
    Running {
        /// Whether the camera has been fitted to a frame yet.
        view_framed: bool,
    },
}

/// Shows one point cloud after another through a [RenderBackend].
///
/// The viewer owns the frame on screen; [Viewer::show] moves the next one in. The camera
/// is fitted to the first frame only, so a user can move it around during playback.
pub struct Viewer<B: RenderBackend> {
    backend: B,
    state: ViewerState,
    geometry: PointCloud,
    frames_shown: usize,
}

impl<B: RenderBackend> Viewer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ViewerState::Uninitialized,
            geometry: PointCloud::new(),
            frames_shown: 0,
        }
    }

    /// Creates the window and binds an empty geometry. Does nothing when already running.
    pub fn open(&mut self) -> Result<(), RenderError> {
        if let ViewerState::Running { .. } = self.state {
            warn!("viewer is already open");
            return Ok(());
        }
        self.backend.create_window()?;
        self.backend.add_geometry(&self.geometry)?;
        self.state = ViewerState::Running { view_framed: false };
        debug!("viewer opened");
        Ok(())
    }

    /// Replaces the geometry with `frame`, fits the camera if this is the first frame, then
    /// handles events and redraws before returning.
    pub fn show(&mut self, frame: PointCloud) -> Result<(), RenderError> {
        let view_framed = match self.state {
            ViewerState::Uninitialized => return Err(RenderError::NoWindow),
            ViewerState::Running { view_framed } => view_framed,
        };

        let (positions, colors) = frame.into_parts();
        self.geometry.replace(positions, colors)?;
        self.backend.update_geometry(&self.geometry)?;

        if !view_framed {
            self.backend.reset_view_point(self.geometry.bounds());
            self.state = ViewerState::Running { view_framed: true };
        }

        self.backend.poll_events()?;
        self.backend.update_renderer(&self.geometry)?;

        self.frames_shown += 1;
        trace!(
            "frame {} shown with {} points",
            self.frames_shown,
            self.geometry.len()
        );
        Ok(())
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }

    /// The frame currently on screen.
    pub fn current_frame(&self) -> &PointCloud {
        &self.geometry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
