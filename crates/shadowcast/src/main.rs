use clap::Parser;
use relm4::prelude::*;
use shadowcast::config;
use shadowcast::gui::app::AppModel;
use shadowcast::gui::diagram::{self, SNAPSHOT_HEIGHT, SNAPSHOT_WIDTH, State};
use shadowcast::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shadowcast", version, about, long_about = None)]
struct Args {
    /// Starting object height in centimeters (overrides the config)
    #[arg(long)]
    height: Option<f64>,

    /// Starting time of day in decimal hours (overrides the config)
    #[arg(short = 't', long)]
    time: Option<f64>,

    /// Write the default config file and print its path
    #[arg(long)]
    init_config: bool,

    /// Render the diagram to a PNG instead of opening a window
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let mut state = State::new(&config)?;
    if let Some(height) = args.height {
        state.set_height(height);
    }
    if let Some(time) = args.time {
        state.set_time(time);
    }

    if let Some(path) = args.snapshot {
        let colors = state.colors();
        diagram::render_png(&state, &colors, SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT, &path)?;
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.gnomon.shadowcast").with_args(Vec::new());

    app.run::<AppModel>((state, rx));
    Ok(())
}
