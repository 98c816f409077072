use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hydrogen_cloud::heatmap::{self, SliceConfig};
use hydrogen_cloud::physics::{radial_wavefunction, real_spherical_harmonic};
use hydrogen_cloud::{
    probability_amplitude, sample_point_cloud, sample_point_cloud_par, DensityMode, QuantumState,
    SampleRequest,
};

#[derive(Parser)]
#[command(name = "hydrogen-cloud", version, about = "Hydrogen orbital probability clouds")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a coloured point cloud and write it as JSON
    Sample(SampleArgs),
    /// Evaluate the wavefunction at one point
    Eval(EvalArgs),
    /// Render the density on the x-z plane as a PNG heatmap
    Heatmap(HeatmapArgs),
}

#[derive(Args)]
struct OrbitalArgs {
    /// Principal quantum number
    #[arg(short)]
    n: Option<u32>,
    /// Azimuthal quantum number
    #[arg(short)]
    l: Option<u32>,
    /// Magnetic quantum number
    #[arg(short, allow_negative_numbers = true)]
    m: Option<i32>,
}

impl OrbitalArgs {
    fn state(&self) -> Result<QuantumState> {
        Ok(QuantumState::new(
            self.n.unwrap_or(1),
            self.l.unwrap_or(0),
            self.m.unwrap_or(0),
        )?)
    }
}

#[derive(Args)]
struct SampleArgs {
    #[command(flatten)]
    orbital: OrbitalArgs,
    /// Number of points; negative yields an empty cloud
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,
    /// redBlue, greenTransparency or blackOrange
    #[arg(long)]
    scheme: Option<String>,
    /// Outer radius cutoff in Bohr radii
    #[arg(long)]
    max_radius: Option<f32>,
    /// absolute or squared
    #[arg(long)]
    density: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    /// Sample chunks on all cores
    #[arg(long)]
    parallel: bool,
    /// JSON request file; flags given on the command line take precedence
    #[arg(long)]
    request: Option<PathBuf>,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SampleArgs {
    fn to_request(&self) -> SampleRequest {
        SampleRequest {
            n: self.orbital.n,
            l: self.orbital.l,
            m: self.orbital.m,
            count: self.count,
            scheme: self.scheme.clone(),
            max_radius: self.max_radius,
            density: self.density.clone(),
            seed: self.seed,
        }
    }
}

#[derive(Args)]
struct EvalArgs {
    #[command(flatten)]
    orbital: OrbitalArgs,
    #[arg(long)]
    r: f32,
    #[arg(long, default_value_t = 0.0)]
    theta: f32,
    #[arg(long, default_value_t = 0.0)]
    phi: f32,
}

#[derive(Args)]
struct HeatmapArgs {
    #[command(flatten)]
    orbital: OrbitalArgs,
    /// Image width and height in pixels
    #[arg(long, default_value_t = 256)]
    size: u32,
    /// Half-width of the plotted window in Bohr radii
    #[arg(long, default_value_t = 10.0)]
    extent: f32,
    #[arg(long)]
    density: Option<String>,
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Sample(args) => run_sample(&args),
        Command::Eval(args) => run_eval(&args),
        Command::Heatmap(args) => run_heatmap(&args),
    }
}

fn run_sample(args: &SampleArgs) -> Result<()> {
    let base = match &args.request {
        Some(path) => SampleRequest::from_path(path)
            .with_context(|| format!("loading request {}", path.display()))?,
        None => SampleRequest::default(),
    };
    let resolved = base.overlay(args.to_request()).resolve()?;
    let state = resolved.state;
    let config = resolved.config;

    info!(
        orbital = %state,
        count = config.point_count,
        scheme = config.color_scheme.as_str(),
        parallel = args.parallel,
        "generating orbital cloud"
    );

    let cloud = match (args.parallel, resolved.seed) {
        (true, seed) => sample_point_cloud_par(state, &config, seed.unwrap_or_else(rand::random)),
        (false, Some(seed)) => sample_point_cloud(state, &config, &mut StdRng::seed_from_u64(seed)),
        (false, None) => sample_point_cloud(state, &config, &mut rand::thread_rng()),
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            cloud.to_json_writer(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), points = cloud.len(), "point cloud written");
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            cloud.to_json_writer(&mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn run_eval(args: &EvalArgs) -> Result<()> {
    let state = args.orbital.state()?;
    let radial = radial_wavefunction(state.n(), state.l(), args.r);
    let angular = real_spherical_harmonic(state.l(), state.m(), args.theta, args.phi);
    let amplitude = probability_amplitude(state, args.r, args.theta, args.phi);

    println!("orbital    {state}");
    println!("radial     {radial:.6e}");
    println!("angular    {angular:.6e}");
    println!("amplitude  {amplitude:.6e}");
    println!("density    {:.6e}", DensityMode::Absolute.apply(amplitude));
    println!("density^2  {:.6e}", DensityMode::Squared.apply(amplitude));
    Ok(())
}

fn run_heatmap(args: &HeatmapArgs) -> Result<()> {
    let state = args.orbital.state()?;
    let config = SliceConfig {
        width: args.size,
        height: args.size,
        extent: args.extent,
        density_mode: DensityMode::from_name(args.density.as_deref()),
    };
    info!(orbital = %state, size = args.size, extent = args.extent, "rendering density slice");

    let values = heatmap::density_slice(state, &config);
    let image = heatmap::render(&values, config.width, config.height);
    heatmap::write_png(&image, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(path = %args.output.display(), "heatmap written");
    Ok(())
}
