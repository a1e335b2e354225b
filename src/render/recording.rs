use super::{RenderBackend, RenderError};
use crate::formats::bounds::Bounds;
use crate::formats::PointCloud;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateWindow,
    AddGeometry,
    UpdateGeometry,
    ResetViewPoint,
    PollEvents,
    UpdateRenderer,
}

/// Records every call; fails [RenderBackend::update_renderer] once `close_after` frames
/// have been drawn, like a window closed by the user.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub framed_bounds: Vec<Option<Bounds>>,
    pub drawn_points: Vec<usize>,
    pub close_after: Option<usize>,
}

impl RecordingBackend {
    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_window(&mut self) -> Result<(), RenderError> {
        self.calls.push(Call::CreateWindow);
        Ok(())
    }

    fn add_geometry(&mut self, _geometry: &PointCloud) -> Result<(), RenderError> {
        self.calls.push(Call::AddGeometry);
        Ok(())
    }

    fn update_geometry(&mut self, _geometry: &PointCloud) -> Result<(), RenderError> {
        self.calls.push(Call::UpdateGeometry);
        Ok(())
    }

    fn reset_view_point(&mut self, bounds: Option<Bounds>) {
        self.calls.push(Call::ResetViewPoint);
        self.framed_bounds.push(bounds);
    }

    fn poll_events(&mut self) -> Result<(), RenderError> {
        self.calls.push(Call::PollEvents);
        Ok(())
    }

    fn update_renderer(&mut self, geometry: &PointCloud) -> Result<(), RenderError> {
        self.calls.push(Call::UpdateRenderer);
        if let Some(limit) = self.close_after {
            if self.drawn_points.len() >= limit {
                return Err(RenderError::WindowClosed);
            }
        }
        self.drawn_points.push(geometry.len());
        Ok(())
    }
}

