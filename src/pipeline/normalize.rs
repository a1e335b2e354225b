use kdam::tqdm;
use log::info;

use super::{create_output_dir, load, output_path, save, BatchReport};
use crate::color::normalize;
use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::frame_dir::FrameDir;

/// Divides the colors of every frame by 256 and writes the frames to the output directory.
pub fn normalize_sequence(config: &NormalizeConfig) -> Result<BatchReport> {
    let frames = FrameDir::open(&config.input_dir)?;
    create_output_dir(&config.output_dir)?;

    let mut report = BatchReport::default();
    for path in tqdm!(frames.paths()) {
        let mut pc = load(&path, &config.input_layout)?;
        normalize(&mut pc);
        save(
            &pc,
            &config.output_layout,
            &output_path(&config.output_dir, &config.prefix, &path),
        )?;
        report.record(pc.len(), pc.len());
    }

    info!(
        "normalized {} frames from {:?} into {:?}",
        report.frames, config.input_dir, config.output_dir
    );
    Ok(report)
}
