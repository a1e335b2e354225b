use std::fs;
use std::path::Path;

use nalgebra::Point3;
use pcseq::config::{DownsampleConfig, NormalizeConfig, PlaybackConfig, TieredPlaybackConfig};
use pcseq::formats::bounds::Bounds;
use pcseq::io::{read_file, write_file, Layout};
use pcseq::pipeline::{downsample_sequence, normalize_sequence, play_sequence, play_tiers};
use pcseq::render::{RenderBackend, RenderError, Viewer, ViewerState};
use pcseq::{Error, PointCloud};

/// Keeps what it was asked to draw.
#[derive(Default)]
struct Screen {
    windows: usize,
    framed: Vec<Option<Bounds>>,
    drawn: Vec<PointCloud>,
}

impl RenderBackend for Screen {
    fn create_window(&mut self) -> Result<(), RenderError> {
        self.windows += 1;
        Ok(())
    }

    fn add_geometry(&mut self, _geometry: &PointCloud) -> Result<(), RenderError> {
        Ok(())
    }

    fn update_geometry(&mut self, _geometry: &PointCloud) -> Result<(), RenderError> {
        Ok(())
    }

    fn reset_view_point(&mut self, bounds: Option<Bounds>) {
        self.framed.push(bounds);
    }

    fn poll_events(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn update_renderer(&mut self, geometry: &PointCloud) -> Result<(), RenderError> {
        self.drawn.push(geometry.clone());
        Ok(())
    }
}

fn frame(points: &[([f32; 3], [f32; 3])]) -> PointCloud {
    let mut pc = PointCloud::new();
    for (p, c) in points {
        pc.push(Point3::from(*p), Point3::from(*c));
    }
    pc
}

fn write_raw(dir: &Path, name: &str, pc: &PointCloud) {
    fs::create_dir_all(dir).unwrap();
    write_file(pc, &Layout::xyzrgb(), dir.join(name)).unwrap();
}

#[test]
fn normalize_downsample_then_play() {
    let root = tempfile::tempdir().unwrap();
    let raw = root.path().join("raw");
    let std_clr = root.path().join("std_clr");
    let small = root.path().join("small");

    // two points sharing a voxel of size 0.5, one alone
    let first = frame(&[
        ([0.1, 0.1, 0.1], [0.0, 128.0, 255.0]),
        ([0.2, 0.2, 0.2], [64.0, 128.0, 255.0]),
        ([2.0, 2.0, 2.0], [256.0, 0.0, 0.0]),
    ]);
    let second = frame(&[([1.0, 0.0, 0.0], [0.0, 0.0, 0.0])]);
    write_raw(&raw, "frame_0001.xyzrgb", &first);
    write_raw(&raw, "frame_0002.xyzrgb", &second);

    let report = normalize_sequence(&NormalizeConfig::new(&raw, &std_clr)).unwrap();
    assert_eq!(report.frames, 2);
    assert_eq!(report.points_in, 4);
    assert_eq!(report.points_out, 4);

    let normalized = read_file(std_clr.join("frame_0001.xyzrgb"), &Layout::xyzrgb()).unwrap();
    assert_eq!(normalized.positions(), first.positions());
    assert_eq!(normalized.colors()[0], Point3::new(0.0, 0.5, 255.0 / 256.0));
    assert_eq!(normalized.colors()[2], Point3::new(1.0, 0.0, 0.0));

    let report = downsample_sequence(&DownsampleConfig::new(&std_clr, &small, 2.0)).unwrap();
    assert_eq!(report.frames, 2);
    assert_eq!(report.points_in, 4);
    assert_eq!(report.points_out, 3);
    assert!(small.join("downsampled_frame_0001.xyzrgb").is_file());
    assert!(small.join("downsampled_frame_0002.xyzrgb").is_file());

    let reduced = read_file(small.join("downsampled_frame_0001.xyzrgb"), &Layout::xyzrgb()).unwrap();
    assert_eq!(reduced.len(), 2);

    let mut config = PlaybackConfig::new(&small);
    config.normalize_colors = false;
    let mut viewer = Viewer::new(Screen::default());
    let shown = play_sequence(&config, &mut viewer).unwrap();
    assert_eq!(shown, 2);
    assert_eq!(viewer.state(), ViewerState::Running { view_framed: true });

    let screen = viewer.into_backend();
    assert_eq!(screen.windows, 1);
    assert_eq!(screen.framed.len(), 1);
    assert_eq!(screen.drawn.len(), 2);
    assert_eq!(screen.drawn[0], reduced);
    assert_eq!(screen.drawn[1].len(), 1);
}

#[test]
fn tiers_follow_the_listing() {
    let root = tempfile::tempdir().unwrap();
    let pc = frame(&[([0.0, 0.0, 0.0], [128.0, 128.0, 128.0])]);
    write_raw(&root.path().join("mixed"), "a.xyzrgb", &pc);
    for tier in ["low", "mid", "high"] {
        let dir = root.path().join(tier);
        write_raw(&dir, "a.xyzrgb", &pc);
        write_raw(&dir, "b.xyzrgb", &pc);
    }

    let mut viewer = Viewer::new(Screen::default());
    let shown = play_tiers(&TieredPlaybackConfig::from_root(root.path()), &mut viewer).unwrap();
    assert_eq!(shown, 3);

    let screen = viewer.into_backend();
    assert_eq!(screen.framed.len(), 1);
    assert_eq!(screen.drawn.len(), 3);
    assert_eq!(screen.drawn[0].colors()[0], Point3::new(0.5, 0.5, 0.5));
}

#[test]
fn missing_directory_is_reported() {
    let root = tempfile::tempdir().unwrap();
    let config = NormalizeConfig::new(root.path().join("nope"), root.path().join("out"));
    match normalize_sequence(&config) {
        Err(Error::FrameDir(_)) => {}
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ply_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.ply");
    let pc = frame(&[
        ([0.5, -1.25, 3.0], [255.0, 0.0, 7.0]),
        ([1.0e-3, 2.0, -0.0], [1.0, 2.0, 3.0]),
    ]);
    write_file(&pc, &Layout::Ply, &path).unwrap();
    assert_eq!(read_file(&path, &Layout::Ply).unwrap(), pc);
}
