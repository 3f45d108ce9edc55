mod ui;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{error, warn};
use serde::Serialize;
use tokio::runtime::Runtime;

use f1champions::{
    F1Error, LoadPhase, RemoteChampionsRepository, RemoteSeasonDetailsRepository, ViewState,
    api::ErgastClient, champions::champions_loader, config::AppConfig, report,
    season_details::season_details_loader,
};
use ui::F1ChampionsApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Base URL of an Ergast-compatible API, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the desktop app (default)
    Gui,
    /// Print the champion of every season
    Champions {
        #[arg(long)]
        json: bool,
    },
    /// Print the winner of every race of a season
    Season {
        #[arg(short, long)]
        season: String,

        #[arg(long)]
        json: bool,
    },
}

fn load_config(api_url: Option<String>) -> AppConfig {
    let mut config = match AppConfig::from_local_file() {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            warn!("Ignoring unreadable config file: {}", e);
            AppConfig::default()
        }
    };
    if let Some(api_url) = api_url {
        config.api_base_url = api_url;
    }
    config
}

fn gui(runtime: &Runtime, config: &AppConfig, api: Arc<ErgastClient>) -> Result<(), F1Error> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(config.window_width, config.window_height))
        .with_min_inner_size(Vec2::new(320., 400.));

    let handle = runtime.handle().clone();
    eframe::run_native(
        "F1 Champions",
        native_options,
        Box::new(move |cc| Ok(Box::new(F1ChampionsApp::new(handle, api, cc)))),
    )
    .map_err(|e| F1Error::GuiError {
        description: e.to_string(),
    })
}

/// Prints a settled state, returns whether it loaded.
fn print_state<D>(state: &ViewState<D>, json: bool) -> Result<bool, F1Error>
where
    D: std::fmt::Display + Serialize,
{
    if state.phase() == LoadPhase::Failed {
        eprintln!("{}", report::render(state));
        return Ok(false);
    }
    if json {
        println!("{}", report::render_json(state)?);
    } else {
        println!("{}", report::render(state));
    }
    Ok(true)
}

fn champions(runtime: &Runtime, api: Arc<ErgastClient>, json: bool) -> Result<bool, F1Error> {
    let mut loader = champions_loader(Arc::new(RemoteChampionsRepository::new(api)));
    runtime.block_on(loader.load(()));
    print_state(loader.state(), json)
}

fn season(
    runtime: &Runtime,
    api: Arc<ErgastClient>,
    season: &str,
    json: bool,
) -> Result<bool, F1Error> {
    let mut loader = season_details_loader(Arc::new(RemoteSeasonDetailsRepository::new(api)));
    runtime.block_on(loader.load(season.to_string()));
    print_state(loader.state(), json)
}

fn run(cli: Args) -> Result<bool, F1Error> {
    let config = load_config(cli.api_url);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| F1Error::RuntimeError { source: e })?;
    let api = Arc::new(ErgastClient::new(&config.api_base_url, config.page_limit));

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => gui(&runtime, &config, api).map(|_| true),
        Commands::Champions { json } => champions(&runtime, api, json),
        Commands::Season { season: year, json } => season(&runtime, api, &year, json),
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
