use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use map_maker::export::{read_tanmimap, write_tanmimap};
use map_maker::{generate, DiffusionParameters, GenerationRequest, MapMode, MarkGrid, MaskSetting};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "map-maker")]
#[command(about = "Generate 2D terrain mark maps by random scattering or diffusion growth")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a map, print it and optionally save it
    Generate(GenerateArgs),
    /// Print the difference mask of two saved maps
    Compare {
        /// First .tanmimap file
        first: PathBuf,
        /// Second .tanmimap file
        second: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Normal,
    Prolifeway,
}

impl From<ModeArg> for MapMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Normal => MapMode::Normal,
            ModeArg::Prolifeway => MapMode::Prolifeway,
        }
    }
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Generation strategy
    #[arg(long, value_enum, default_value = "normal")]
    mode: ModeArg,

    /// Map width (number of printed rows)
    #[arg(short = 'W', long, default_value = "10")]
    width: usize,

    /// Map height (marks per printed row)
    #[arg(short = 'H', long, default_value = "10")]
    height: usize,

    /// Number of distinct marks, mark 0 being water
    #[arg(short, long, default_value = "2")]
    marks: u32,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Turn land that cannot reach the map border into water
    #[arg(long)]
    remove_isolated_land: bool,

    /// Grow circular blobs instead of diamonds
    #[arg(long)]
    circle: bool,

    /// Per-cell probability of planting a growth seed
    #[arg(long, default_value = "0.01")]
    density: f32,

    /// Growth range is (width + height) / range-divisor
    #[arg(long, default_value = "6")]
    range_divisor: usize,

    /// Save the map to this .tanmimap file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't print the map
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Generate(args) => run_generate(args),
        Command::Compare { first, second } => run_compare(&first, &second),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let setting = MaskSetting::new()
        .remove_isolated_land(args.remove_isolated_land)
        .prolifeway_circle(args.circle);
    let request = GenerationRequest::new(args.mode.into(), args.width, args.height, args.marks, seed)
        .with_setting(setting)
        .with_diffusion(DiffusionParameters {
            density: args.density,
            range_divisor: args.range_divisor,
        });

    let grid = generate(&request).context("failed to generate map")?;

    if !args.quiet {
        println!("Seed: {}", seed);
        print!("{}", grid);
    }

    if let Some(path) = args.output {
        write_tanmimap(&grid, &path)
            .with_context(|| format!("failed to save map to {}", path.display()))?;
        println!("Map written to {}", path.display());
    }

    Ok(())
}

fn run_compare(first: &Path, second: &Path) -> Result<()> {
    let a = read_tanmimap(first).with_context(|| format!("failed to read {}", first.display()))?;
    let b = read_tanmimap(second).with_context(|| format!("failed to read {}", second.display()))?;

    let diff = MarkGrid::compare(&a, &b);
    print!("{}", diff);
    println!(
        "{} of {} cells differ",
        diff.diff_count(),
        diff.width() * diff.height()
    );
    Ok(())
}
