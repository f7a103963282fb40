// silhouette_cli/src/main.rs
#![forbid(unsafe_code)]

mod config;
mod input;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use silhouette_engine::engine::{block_by_name, block_names, Difficulty, Structure, StructureConfig};
use silhouette_engine::policy::{ChamberPolicy, NoPigs, PigPolicy, SurprisePolicy};

#[derive(Parser, Debug)]
#[command(name = "silhouette_cli")]
struct Args {
    /// Input files: one polygon point list per file ("x,y x,y ..."), or one
    /// 0/1 segmentation mask per file with --mask.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Treat inputs as segmentation masks instead of polygons.
    #[arg(long)]
    mask: bool,

    // ---------------- structure configuration ----------------
    /// Primary block type name (registry key).
    #[arg(long)]
    primary_block: Option<String>,

    /// Platform block type name (registry key).
    #[arg(long)]
    platform_block: Option<String>,

    /// Target primary-block count along the x axis.
    #[arg(long)]
    blocks_x: Option<usize>,

    /// Cell-area coverage fraction required for occupancy.
    #[arg(long)]
    coverage: Option<f64>,

    /// Difficulty: easy | medium | hard (selects the projectile loadout).
    #[arg(long)]
    difficulty: Option<String>,

    // ---------------- pig placement ----------------
    /// Pig policy: chamber | surprise | none
    #[arg(long, default_value = "chamber")]
    pigs: String,

    /// Seed for --pigs surprise. If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    // ---------------- output ----------------
    /// Directory the level documents are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Optional TOML defaults file; explicit flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbosity: 0 = final summary only, 1 = progress bar.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => config::FileConfig::default(),
    };

    // Flag > config file > built-in default.
    let defaults = StructureConfig::default();
    let difficulty_name = args
        .difficulty
        .clone()
        .or(file.difficulty)
        .unwrap_or_else(|| "medium".to_string());
    let Some(difficulty) = Difficulty::from_cli(&difficulty_name) else {
        bail!("unknown difficulty {difficulty_name:?} (expected easy | medium | hard)");
    };
    let cfg = StructureConfig {
        primary_block: args
            .primary_block
            .clone()
            .or(file.primary_block)
            .unwrap_or(defaults.primary_block),
        platform_block: args
            .platform_block
            .clone()
            .or(file.platform_block)
            .unwrap_or(defaults.platform_block),
        blocks_x: args.blocks_x.or(file.blocks_x).unwrap_or(defaults.blocks_x),
        coverage: args.coverage.or(file.coverage).unwrap_or(defaults.coverage),
        difficulty,
    };
    let out_dir = args
        .out_dir
        .clone()
        .or(file.out_dir)
        .unwrap_or_else(|| PathBuf::from("levels"));

    for name in [&cfg.primary_block, &cfg.platform_block] {
        if block_by_name(name).is_none() {
            bail!(
                "unknown block type {name:?} (known: {})",
                block_names().join(", ")
            );
        }
    }

    // Policy instance (boxed so the CLI can switch implementations at runtime).
    let base_seed = args.seed.unwrap_or(12345);
    let mut policy: Box<dyn PigPolicy> = match args.pigs.as_str() {
        "chamber" => Box::new(ChamberPolicy),
        "surprise" => Box::new(SurprisePolicy::new(base_seed)),
        "none" => Box::new(NoPigs),
        other => bail!("unknown pig policy {other:?} (expected chamber | surprise | none)"),
    };

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    // Progress bar is UI only; pipeline logic does not depend on it.
    let pb = if args.verbosity >= 1 && args.inputs.len() > 1 {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>4}/{len:<4}  {elapsed_precise}  {msg}",
            )
            .unwrap()
            .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut shapes_done = 0usize;
    let mut total_blocks = 0usize;
    let mut total_tokens = 0usize;

    for input in &args.inputs {
        let structure = if args.mask {
            let mask = input::load_mask(input)?;
            Structure::from_mask(&mask, &cfg, policy.as_mut())
                .with_context(|| format!("invalid configuration for {}", input.display()))?
        } else {
            let shape = input::load_polygon(input)?;
            Structure::from_polygon(&shape, &cfg, policy.as_mut())
                .with_context(|| format!("invalid configuration for {}", input.display()))?
        };

        let stem = input
            .file_stem()
            .with_context(|| format!("input {} has no file name", input.display()))?;
        let out_path = out_dir.join(stem).with_extension("xml");
        structure
            .write_level(&out_path)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!("wrote {}", out_path.display());

        shapes_done += 1;
        total_blocks += structure.grid().occupied_count();
        total_tokens += structure.placements().len();
        if let Some(ref pb) = pb {
            pb.set_message(stem.to_string_lossy().into_owned());
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: shapes={} primary_blocks={} tokens={} primary={} platform={} blocks_x={} out_dir={}",
        shapes_done,
        total_blocks,
        total_tokens,
        cfg.primary_block,
        cfg.platform_block,
        cfg.blocks_x,
        out_dir.display(),
    );
    Ok(())
}
