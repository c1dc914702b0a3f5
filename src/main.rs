//! naksha - decode Hackerbot map frames into ROS maps
//!
//! # Usage
//!
//! ```bash
//! # Decode a saved GETMAP dump
//! naksha decode --file active_map-1.txt --output maps/ --name kitchen
//!
//! # Show header fields only
//! naksha info --file active_map-1.txt
//!
//! # Talk to the base directly
//! naksha list --port /dev/ttyACM0
//! naksha pull --map-id 1 --save-frame active_map-1.txt
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use naksha::device::{self, MapLink};
use naksha::frame::envelope;
use naksha::transport::SerialTransport;
use naksha::{ColorPolicy, FrameInfo, MapPipeline, NakshaConfig, Result};

#[derive(Parser)]
#[command(name = "naksha", version)]
#[command(about = "Decode Hackerbot compressed map frames into ROS occupancy grids")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to configs/naksha.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a saved frame (JSON, hex, or binary) and export the map
    Decode {
        /// Frame file
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Print frame header diagnostics
    Info {
        /// Frame file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List maps stored on the base
    List {
        #[command(flatten)]
        port: PortArgs,
    },

    /// Download a map from the base, then decode and export it
    Pull {
        /// Map to download (defaults to the first listed)
        #[arg(short, long)]
        map_id: Option<String>,

        /// Also save the received envelope to this file
        #[arg(long)]
        save_frame: Option<PathBuf>,

        #[command(flatten)]
        port: PortArgs,

        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base name for written files
    #[arg(short, long)]
    name: Option<String>,

    /// Cell classification policy
    #[arg(long, value_enum)]
    policy: Option<ColorPolicy>,

    /// Fixed segmentation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the bordered grid without segmenting it
    #[arg(long)]
    no_segment: bool,
}

#[derive(Args)]
struct PortArgs {
    /// Serial port path
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => NakshaConfig::load(path)?,
        None => NakshaConfig::load_default()?,
    };

    match cli.command {
        Command::Decode { file, decode } => {
            decode.apply(&mut config);
            let raw = read_frame(&file)?;
            decode_and_export(&config, &raw)
        }
        Command::Info { file } => {
            let raw = read_frame(&file)?;
            let info = FrameInfo::inspect(&raw)?;
            println!("{}", info);
            if !info.dimensions_consistent() {
                println!(
                    "Warning: {}x{} does not match original size {}",
                    info.header.width, info.header.height, info.header.original_size
                );
            }
            Ok(())
        }
        Command::List { port } => {
            port.apply(&mut config);
            let mut link = open_link(&config)?;
            let list = link.list_maps()?;
            println!("{} map(s) on the base:", list.map_num);
            for id in &list.map_ids {
                println!("  {}", id);
            }
            link.shutdown()
        }
        Command::Pull {
            map_id,
            save_frame,
            port,
            decode,
        } => {
            port.apply(&mut config);
            decode.apply(&mut config);

            let mut link = open_link(&config)?;
            let map_id = match map_id {
                Some(id) => id,
                None => {
                    let list = link.list_maps()?;
                    list.map_ids.into_iter().next().ok_or_else(|| {
                        naksha::Error::Device("no maps available".to_string())
                    })?
                }
            };
            let text = link.download_envelope(&map_id)?;
            link.shutdown()?;

            if let Some(path) = &save_frame {
                std::fs::write(path, &text)?;
                log::info!("Saved envelope to {}", path.display());
            }
            let (_, raw) = envelope::unwrap_frame(&text)?;
            decode_and_export(&config, &raw)
        }
    }
}

impl DecodeArgs {
    fn apply(self, config: &mut NakshaConfig) {
        if let Some(output) = self.output {
            config.export.output_dir = output.to_string_lossy().into_owned();
        }
        if let Some(name) = self.name {
            config.export.map_name = name;
        }
        if let Some(policy) = self.policy {
            config.decode.color_policy = policy;
        }
        if self.seed.is_some() {
            config.segment.seed = self.seed;
        }
        if self.no_segment {
            config.segment.enabled = false;
        }
    }
}

impl PortArgs {
    fn apply(self, config: &mut NakshaConfig) {
        if let Some(port) = self.port {
            config.device.port = port;
        }
        if let Some(baud) = self.baud {
            config.device.baud_rate = baud;
        }
    }
}

fn read_frame(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    let (kind, raw) = envelope::unwrap_frame(&data)?;
    log::debug!("{}: {:?} envelope, {} bytes", path.display(), kind, raw.len());
    Ok(raw)
}

fn open_link(config: &NakshaConfig) -> Result<MapLink<SerialTransport>> {
    device::connect(
        &config.device.port,
        config.device.baud_rate,
        config.link_config(),
    )
}

fn decode_and_export(config: &NakshaConfig, raw: &[u8]) -> Result<()> {
    let pipeline = MapPipeline::new(config.to_pipeline_config()?)?;
    let map = pipeline.decode(raw)?;

    println!("{}", FrameInfo::inspect(raw)?);
    println!("Border cells added: {}", map.report.border_cells_added);
    if let Some(seg) = &map.report.segment {
        println!(
            "Segmentation: {} free, {} unknown, {} walls (seed found after {} attempt(s))",
            seg.interior_cells,
            seg.exterior_cells + seg.unreached_cells,
            seg.border_cells,
            seg.attempts
        );
    }

    let files = pipeline.export(&map)?;
    for path in files.paths() {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
