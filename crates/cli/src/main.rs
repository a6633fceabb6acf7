#![deny(unsafe_code)]
//! CLI for the metaball renderer.
//!
//! Subcommands:
//! - `render` -- simulate N ticks headlessly and write the last frame as PNG
//! - `shader` -- print the vertex and rendered fragment sources

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use metaball_core::shader_source::VERTEX_SHADER;
use metaball_core::{FieldSourceSet, RenderLoop, RendererConfig, ShaderConstants, StopSignal};
use metaball_headless::snapshot::write_png;
use metaball_headless::HeadlessBackend;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "metaballs", about = "Real-time metaball field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N ticks and write the final frame as PNG.
    Render {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        /// Number of field sources.
        #[arg(short = 'n', long, default_value_t = metaball_core::config::DEFAULT_SOURCE_COUNT)]
        count: usize,

        /// PRNG seed for the initial population.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Ticks to simulate before the snapshot.
        #[arg(short, long, default_value_t = 120, value_parser = clap::value_parser!(u64).range(1..))]
        frames: u64,

        /// Config overrides as a JSON object (e.g. '{"max_speed": 2.0}').
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "metaballs.png")]
        output: PathBuf,
    },
    /// Print the shader sources compiled for a given viewport and count.
    Shader {
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        #[arg(short = 'n', long, default_value_t = metaball_core::config::DEFAULT_SOURCE_COUNT)]
        count: usize,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            width,
            height,
            count,
            seed,
            frames,
            params,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let config = RendererConfig {
                count,
                seed,
                ..RendererConfig::with_size(width, height)
            }
            .merge_json(&params);
            config.validate()?;

            let viewport = config.viewport()?;
            let sources = FieldSourceSet::spawn(&config)?;
            let mut render_loop = RenderLoop::new(sources, HeadlessBackend::new(viewport));

            let stop = StopSignal::new();
            let pacer = stop.clone();
            render_loop.run_until_stopped(&stop, |done| {
                if done >= frames {
                    pacer.stop();
                }
            });

            let rgba = render_loop
                .backend()
                .frame_rgba()
                .ok_or_else(|| CliError::Io("no frame was drawn".into()))?;
            write_png(rgba, viewport, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "config": config,
                    "frames": render_loop.frame_index(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} sources ({}x{}, {} ticks, seed {}) -> {}",
                    config.count,
                    config.width,
                    config.height,
                    render_loop.frame_index(),
                    config.seed,
                    output.display()
                );
            }
        }
        Command::Shader {
            width,
            height,
            count,
        } => {
            let viewport = RendererConfig::with_size(width, height).viewport()?;
            let fragment = ShaderConstants::new(viewport, count)?.render_fragment();
            if cli.json {
                let info = serde_json::json!({
                    "vertex": VERTEX_SHADER,
                    "fragment": fragment,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("// vertex\n{VERTEX_SHADER}\n// fragment\n{fragment}");
            }
        }
    }

    Ok(())
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::debug!("logging initialized");
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
