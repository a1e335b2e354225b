use kdam::tqdm;
use log::{debug, info};

use super::{create_output_dir, load, output_path, save, BatchReport};
use crate::color::normalize;
use crate::config::DownsampleConfig;
use crate::downsample::downsample;
use crate::error::{Error, Result};
use crate::frame_dir::FrameDir;

/// Voxel downsamples every frame with edge length `1 / compression_rate` and writes the
/// result next to the others in the output directory, named `<prefix><input name>`.
pub fn downsample_sequence(config: &DownsampleConfig) -> Result<BatchReport> {
    let frames = FrameDir::open(&config.input_dir)?;
    create_output_dir(&config.output_dir)?;
    let voxel_size = config.voxel_size();
    debug!(
        "compression rate {} gives voxel size {}",
        config.compression_rate, voxel_size
    );

    let mut report = BatchReport::default();
    for path in tqdm!(frames.paths()) {
        let mut pc = load(&path, &config.input_layout)?;
        if config.normalize_colors {
            normalize(&mut pc);
        }
        let downsampled = downsample(&pc, voxel_size).map_err(|source| Error::Downsample {
            path: path.clone(),
            source,
        })?;
        debug!("{:?}: {} -> {} points", path, pc.len(), downsampled.len());
        save(
            &downsampled,
            &config.output_layout,
            &output_path(&config.output_dir, &config.prefix, &path),
        )?;
        report.record(pc.len(), downsampled.len());
    }

    info!(
        "downsampled {} frames, {} points down to {}",
        report.frames, report.points_in, report.points_out
    );
    Ok(report)
}
