use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tunnelseg::{AnalysisConfig, AnalysisSession, FnObserver};

#[derive(Parser)]
#[command(name = "tunnelseg")]
#[command(about = "Segment a tunnel LiDAR scan into ground and wall planes")]
struct Args {
    /// Input LAS/LAZ file
    #[arg(short, long)]
    file: PathBuf,

    /// TOML configuration file (defaults are used for missing keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum wall height (metres)
    #[arg(long)]
    min_wall_height: Option<f64>,

    /// RANSAC inlier distance (metres)
    #[arg(long)]
    ransac_distance: Option<f64>,

    /// Maximum plane tilt classified as ground (degrees)
    #[arg(long)]
    ground_angle: Option<f64>,

    /// Minimum plane tilt classified as wall (degrees)
    #[arg(long)]
    wall_angle: Option<f64>,

    /// Fixed RANSAC seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Extract a cross-section at this Y position
    #[arg(long)]
    cross: Option<f64>,

    /// Half-width of the cross-section slab (metres)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Export the cross-section to CSV (requires --cross)
    #[arg(long, requires = "cross")]
    export_csv: Option<PathBuf>,

    /// Write ground.ply, wall1.ply and wall2.ply into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> tunnelseg::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(v) = args.min_wall_height {
        config.min_wall_height = v;
    }
    if let Some(v) = args.ransac_distance {
        config.ransac_distance = v;
    }
    if let Some(v) = args.ground_angle {
        config.ground_angle_deg = v;
    }
    if let Some(v) = args.wall_angle {
        config.wall_angle_deg = v;
    }
    if let Some(v) = args.tolerance {
        config.cross_section_tolerance = v;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn run(args: &Args) -> tunnelseg::Result<()> {
    let config = load_config(args)?;
    let mut session = AnalysisSession::new(config);

    let header = session.load_las(&args.file)?;
    println!(
        "Loaded '{}' with {} points ({:.2} MB)",
        header.file_name(),
        header.point_count,
        header.size_mb()
    );

    let mut observer = FnObserver::new(
        |percent: f64| log::debug!("progress {:.0}%", percent),
        |message: &str| log::info!("{}", message),
    );
    let stats = session.analyze_with(&mut observer)?.stats;
    println!("{}", session.summary()?);
    println!(
        "{} iterations, {} walls found, seed {}",
        stats.iterations, stats.walls_found, stats.seed
    );

    if let Some(dir) = &args.export_dir {
        for path in session.export_partitions_ply(dir)? {
            println!("Saved {}", path.display());
        }
    }

    if let Some(y) = args.cross {
        let tolerance = session.config().cross_section_tolerance;
        let slice = session.cross_section(y, tolerance)?;
        println!(
            "Cross-section at y = {}: {} ground, {} wall1, {} wall2 points",
            y,
            slice.ground.len(),
            slice.wall1.len(),
            slice.wall2.len()
        );
        if let Some(spacing) = slice.wall_spacing() {
            println!("Wall spacing: {:.3} m", spacing);
        }
        if let Some(out) = &args.export_csv {
            let out = session.export_cross_section_csv(out)?;
            println!("Cross-section exported: {}", out.display());
        }
    }

    Ok(())
}
