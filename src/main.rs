use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use config::{ArmConfig, DrawConfig, SweepConfig};
use diagram::{draw_figure, Figure};
use geom::Point;
use render::{Primitive, Recorder, SvgSurface};
use sweep::{check_sample_count, grid_angles, random_angles, save_csv, Summary};

mod config;
mod diagram;
mod fk;
mod geom;
mod render;
mod sweep;

#[derive(Parser)]
#[command(
    version,
    about = "Forward kinematics and derivation diagrams for a planar two-link arm."
)]
struct Cli {
    /// Level of verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print shoulder, elbow and wrist positions.
    Fk {
        #[clap(allow_hyphen_values(true))]
        theta0: f64,
        #[clap(allow_hyphen_values(true))]
        theta1: f64,
        #[clap(long, allow_hyphen_values(true))]
        l0: Option<f64>,
        #[clap(long, allow_hyphen_values(true))]
        l1: Option<f64>,
    },
    /// Render the derivation figures as SVG.
    Draw {
        #[clap(allow_hyphen_values(true))]
        theta0: Option<f64>,
        #[clap(allow_hyphen_values(true))]
        theta1: Option<f64>,
        #[clap(long, allow_hyphen_values(true))]
        l0: Option<f64>,
        #[clap(long, allow_hyphen_values(true))]
        l1: Option<f64>,
        /// Single figure to draw, all of them when omitted.
        #[clap(short, long)]
        figure: Option<Figure>,
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(long)]
        arc_points: Option<usize>,
        /// List the primitives instead of writing files.
        #[clap(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Evaluate the arm over many joint configurations and write a CSV.
    Sweep {
        #[clap(short, long)]
        steps: Option<usize>,
        /// Sample this many random configurations instead of a grid.
        #[clap(short, long)]
        random: Option<usize>,
        #[clap(long, allow_hyphen_values(true))]
        l0: Option<f64>,
        #[clap(long, allow_hyphen_values(true))]
        l1: Option<f64>,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

fn link_lengths(l0: Option<f64>, l1: Option<f64>) -> (f64, f64) {
    let default = ArmConfig::default().link_lengths;
    return (l0.unwrap_or(default.0), l1.unwrap_or(default.1));
}

fn fmt_point(p: Point) -> String {
    return format!("({:>8.4}, {:>8.4})", p.0, p.1);
}

fn run_fk(config: ArmConfig) {
    let arm = config.chain();
    log::debug!(
        "Link lengths {:?}, joint angles {:?}",
        arm.link_lengths(),
        arm.joint_angles()
    );

    println!("{:>9} {}", "shoulder".bold(), fmt_point(arm.shoulder()));
    println!("{:>9} {}", "elbow".bold(), fmt_point(arm.elbow()));
    println!("{:>9} {}", "wrist".bold().green(), fmt_point(arm.wrist()).green());
    println!("{:>9} {:>8.4}", "reach".bold(), arm.reach());
}

fn run_draw(config: &DrawConfig) -> anyhow::Result<()> {
    let arm = config.arm.chain();

    if config.dry_run {
        let mut surface = Recorder::default();
        for figure in &config.figures {
            draw_figure(*figure, &arm, config.arc_points, &mut surface)?;
        }
        for (figure, frame) in config.figures.iter().zip(surface.frames()) {
            println!("{}", figure.name().bold());
            for primitive in frame {
                match primitive {
                    Primitive::Polyline { points, style } => {
                        println!("  Polyline {{ {} points, style: {:?} }}", points.len(), style);
                    }
                    other => println!("  {:?}", other),
                }
            }
        }
        return Ok(());
    }

    std::fs::create_dir_all(&config.output)
        .with_context(|| format!("failed to create {}", config.output.display()))?;

    for figure in &config.figures {
        let target = config.output.join(format!("{}.svg", figure.name()));
        let mut surface = SvgSurface::new(target.clone());
        draw_figure(*figure, &arm, config.arc_points, &mut surface)?;
        println!("{} {}", "wrote".green(), target.display());
    }

    return Ok(());
}

fn run_sweep(config: &SweepConfig) -> anyhow::Result<()> {
    let angles = match config.random {
        Some(n) => {
            check_sample_count(n)?;
            random_angles(n)
        }
        None => grid_angles(config.steps, config.steps)?,
    };
    log::debug!("Sweeping {} configurations", angles.len());

    let bar = ProgressBar::new(angles.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}/{duration_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}",
        )?
        .progress_chars("##-"),
    );

    let samples = sweep::sweep(config.link_lengths, &angles, &bar);
    bar.finish();

    save_csv(&config.output, &samples)?;

    match Summary::of(&samples) {
        Some(summary) => println!(
            "{} samples, reach min {:.4} max {:.4} mean {:.4}",
            summary.count.to_string().bold(),
            summary.min_reach,
            summary.max_reach,
            summary.mean_reach
        ),
        None => println!("{}", "no samples".yellow()),
    }

    return Ok(());
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(log::LevelFilter::Off);
    log_config.set_thread_level(log::LevelFilter::Off);
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    let log_level = match args.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    match args.command {
        Commands::Fk {
            theta0,
            theta1,
            l0,
            l1,
        } => {
            let config = ArmConfig {
                link_lengths: link_lengths(l0, l1),
                joint_angles: (theta0, theta1),
            };
            log::trace!("{:#?}", config);
            run_fk(config);
        }
        Commands::Draw {
            theta0,
            theta1,
            l0,
            l1,
            figure,
            output,
            arc_points,
            dry_run,
        } => {
            let config = DrawConfig {
                arm: ArmConfig {
                    link_lengths: link_lengths(l0, l1),
                    joint_angles: (theta0.unwrap_or(0.5), theta1.unwrap_or(1.0)),
                },
                arc_points: arc_points.unwrap_or(100),
                figures: match figure {
                    Some(figure) => vec![figure],
                    None => Figure::ALL.to_vec(),
                },
                output: output.unwrap_or_else(|| PathBuf::from("figures")),
                dry_run,
            };
            log::trace!("{:#?}", config);
            run_draw(&config)?;
        }
        Commands::Sweep {
            steps,
            random,
            l0,
            l1,
            output,
        } => {
            let config = SweepConfig {
                link_lengths: link_lengths(l0, l1),
                steps: steps.unwrap_or(36),
                random,
                output: output.unwrap_or_else(|| PathBuf::from("workspace.csv")),
            };
            log::trace!("{:#?}", config);
            run_sweep(&config)?;
        }
    }

    return Ok(());
}
