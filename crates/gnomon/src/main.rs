use clap::{Args, Parser, Subcommand};
use gnomon::clock::{self, DEFAULT_ZONE};
use gnomon::scene::{self, DEFAULT_HEIGHT, DEFAULT_TIME, HEIGHT_RANGE, TIME_RANGE};
use gnomon::units::{Centimeters, Hours};
use gnomon::{Inputs, Scene, Viewport};
use std::ops::RangeInclusive;

#[derive(Parser, Debug)]
#[command(name = "gnomon", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the sun angle and shadow for one height and time (default)
    Report(ReportArgs),
    /// Tabulate the shadow across the day for one height
    Sweep {
        /// Object height in centimeters
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: f64,

        /// First time of day, in decimal hours
        #[arg(long, default_value_t = *TIME_RANGE.start())]
        from: f64,

        /// Last time of day, in decimal hours
        #[arg(long, default_value_t = *TIME_RANGE.end())]
        to: f64,

        /// Interval between rows, in hours (at least 0.25)
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Object height in centimeters
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,

    /// Time of day in decimal hours (9.5 is 9:30)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIME)]
    time: f64,

    /// Time zone label appended to the clock time
    #[arg(long, default_value = DEFAULT_ZONE)]
    zone: String,

    /// Print the scene as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Report(args)) => report(&args),
        Some(Commands::Sweep {
            height,
            from,
            to,
            step,
        }) => sweep(height, from, to, step),
        None => report(&cli.report),
    }
}

fn ensure_in(name: &str, value: f64, range: &RangeInclusive<f64>) -> anyhow::Result<()> {
    if !range.contains(&value) {
        anyhow::bail!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        );
    }
    Ok(())
}

fn report(args: &ReportArgs) -> anyhow::Result<()> {
    ensure_in("height", args.height, &HEIGHT_RANGE)?;
    ensure_in("time", args.time, &TIME_RANGE)?;

    let inputs = Inputs {
        height: Centimeters::new(args.height),
        time: Hours::new(args.time),
    };
    let scene = Scene::compute(&inputs, &Viewport::default(), &args.zone)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!("Object height:   {:.0} cm", *scene.inputs.height);
    println!("Time of day:     {}", scene.formatted_time);
    println!("Sun angle:       {:.2}°", *scene.sun_angle);
    println!("Shadow length:   {} cm", scene.shadow_label());
    Ok(())
}

fn sweep(height: f64, from: f64, to: f64, step: f64) -> anyhow::Result<()> {
    ensure_in("height", height, &HEIGHT_RANGE)?;
    let rows = scene::sweep(
        Centimeters::new(height),
        Hours::new(from),
        Hours::new(to),
        step,
    )?;

    println!("{:>12}  {:>8}  {:>12}", "time", "angle", "shadow (cm)");
    for row in rows {
        println!(
            "{:>12}  {:>7.2}°  {:>12}",
            clock::format_clock_time_in(row.time, ""),
            *row.sun_angle,
            scene::format_shadow_length(row.shadow_length)
        );
    }
    Ok(())
}
