use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use pcseq::config::{
    parse_compression_rate, DownsampleConfig, NormalizeConfig, PlaybackConfig,
    TieredPlaybackConfig, ViewerConfig, DEFAULT_LISTING_DIR, DOWNSAMPLED_PREFIX,
};
use pcseq::io::Layout;
use pcseq::pipeline::{downsample_sequence, normalize_sequence, play_sequence, play_tiers};
use pcseq::render::{Viewer, WindowBackend};

/// Normalize, downsample and play directories of point cloud files in file name order
#[derive(Parser)]
#[clap(name = "pcseq", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Divide the colors of every frame by 256 and write them out
    Normalize(NormalizeArgs),
    /// Voxel downsample every frame, voxel size = 1 / rate
    Downsample(DownsampleArgs),
    /// Play a directory in a viewer window
    Play(PlayArgs),
    /// Play the names listed in one directory from each quality tier in turn
    PlayTiers(PlayTiersArgs),
}

#[derive(Args)]
struct NormalizeArgs {
    /// Directory with the frames to normalize
    input_dir: PathBuf,
    #[clap(short, long, default_value = "std_clr")]
    output_dir: PathBuf,
    /// Layout of the input files: a column order such as xyzrgb, or ply
    #[clap(long, default_value = "xyzrgb")]
    input_layout: Layout,
    #[clap(long, default_value = "xyzrgb")]
    output_layout: Layout,
    /// Prepended to every output file name
    #[clap(long, default_value = "")]
    prefix: String,
}

#[derive(Args)]
struct DownsampleArgs {
    #[clap(short, long, default_value = "std_clr")]
    input_dir: PathBuf,
    #[clap(short, long, default_value = "downsample/test")]
    output_dir: PathBuf,
    /// Compression rate, asked for on stdin when omitted
    #[clap(short, long)]
    rate: Option<String>,
    #[clap(long, default_value = "xyzrgb")]
    input_layout: Layout,
    #[clap(long, default_value = "xyzrgb")]
    output_layout: Layout,
    #[clap(long, default_value = DOWNSAMPLED_PREFIX)]
    prefix: String,
    /// Divide colors by 256 before downsampling
    #[clap(long)]
    normalize: bool,
}

#[derive(Args)]
struct PlayArgs {
    /// Directory with all the frames, asked for on stdin when omitted
    dir: Option<PathBuf>,
    #[clap(long, default_value = "xyzrgb")]
    layout: Layout,
    /// Show colors as stored instead of dividing them by 256
    #[clap(long)]
    raw_colors: bool,
    #[clap(flatten)]
    viewer: ViewerArgs,
}

#[derive(Args)]
struct PlayTiersArgs {
    /// Directory holding the listing directory and the tier directories
    #[clap(default_value = "downsample")]
    root: PathBuf,
    /// Directory whose file names are played, relative to root
    #[clap(long, default_value = DEFAULT_LISTING_DIR)]
    listing: PathBuf,
    /// Tier directories relative to root, played in order (default: low mid high)
    #[clap(long = "tier")]
    tiers: Vec<PathBuf>,
    #[clap(long, default_value = "xyzrgb")]
    layout: Layout,
    #[clap(long)]
    raw_colors: bool,
    #[clap(flatten)]
    viewer: ViewerArgs,
}

#[derive(Args)]
struct ViewerArgs {
    #[clap(long, default_value = "pcseq")]
    title: String,
    #[clap(short, long, default_value_t = 1600)]
    width: u32,
    #[clap(long, default_value_t = 900)]
    height: u32,
    #[clap(long, default_value_t = 1.0)]
    point_size: f32,
}

impl From<ViewerArgs> for ViewerConfig {
    fn from(args: ViewerArgs) -> Self {
        ViewerConfig {
            title: args.title,
            width: args.width,
            height: args.height,
            point_size: args.point_size,
            ..ViewerConfig::default()
        }
    }
}

/// Writes `message` and reads one line back, without its line break.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> io::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_stdin(message: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&mut stdin.lock(), &mut stdout, message).context("failed to read from stdin")
}

fn normalize_config(args: NormalizeArgs) -> NormalizeConfig {
    let mut config = NormalizeConfig::new(args.input_dir, args.output_dir);
    config.input_layout = args.input_layout;
    config.output_layout = args.output_layout;
    config.prefix = args.prefix;
    config
}

fn downsample_config(args: DownsampleArgs, rate: &str) -> Result<DownsampleConfig> {
    let rate = parse_compression_rate(rate)?;
    let mut config = DownsampleConfig::new(args.input_dir, args.output_dir, rate);
    config.input_layout = args.input_layout;
    config.output_layout = args.output_layout;
    config.prefix = args.prefix;
    config.normalize_colors = args.normalize;
    Ok(config)
}

fn playback_config(args: PlayArgs, dir: PathBuf) -> PlaybackConfig {
    let mut config = PlaybackConfig::new(dir);
    config.layout = args.layout;
    config.normalize_colors = !args.raw_colors;
    config.viewer = args.viewer.into();
    config
}

fn tiered_config(args: PlayTiersArgs) -> TieredPlaybackConfig {
    let mut config = TieredPlaybackConfig::from_root(&args.root);
    config.listing_dir = args.root.join(args.listing);
    if !args.tiers.is_empty() {
        config.tier_dirs = args.tiers.iter().map(|tier| args.root.join(tier)).collect();
    }
    config.layout = args.layout;
    config.normalize_colors = !args.raw_colors;
    config.viewer = args.viewer.into();
    config
}

fn main() -> Result<()> {
    // initialize logger
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize(args) => {
            let report = normalize_sequence(&normalize_config(args))?;
            info!("{:?}", report);
        }
        Command::Downsample(mut args) => {
            let rate = match args.rate.take() {
                Some(rate) => rate,
                None => prompt_stdin("Compression Rate:")?,
            };
            let config = downsample_config(args, &rate)?;
            let report = downsample_sequence(&config)?;
            info!("{:?}", report);
        }
        Command::Play(mut args) => {
            let dir = match args.dir.take() {
                Some(dir) => dir,
                None => PathBuf::from(prompt_stdin("PATH=")?),
            };
            let config = playback_config(args, dir);
            let mut viewer = Viewer::new(WindowBackend::new(config.viewer.clone()));
            play_sequence(&config, &mut viewer)?;
        }
        Command::PlayTiers(args) => {
            let config = tiered_config(args);
            let mut viewer = Viewer::new(WindowBackend::new(config.viewer.clone()));
            play_tiers(&config, &mut viewer)?;
        }
    }
    Ok(())
}
