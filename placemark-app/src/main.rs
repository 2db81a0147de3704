use anyhow::Context as _;
use clap::Parser;
use placemark::{
    runtime::spawners::tokio_impl::TokioSpawner,
    ui::{ExplorerStyle, ExplorerView},
    ExplorerConfig, LatLng, MapScreen, MapServices,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Search places, inspect them, and get directions from home
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON configuration file
    #[arg(short, long, env = "PLACEMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Home coordinate as "lat,lng"; overrides the configuration
    #[arg(long, value_parser = parse_home)]
    home: Option<LatLng>,

    /// Mapillary client token enabling street-level previews
    #[arg(long, env = "MAPILLARY_TOKEN")]
    preview_token: Option<String>,
}

fn parse_home(text: &str) -> Result<LatLng, String> {
    LatLng::parse_pair(text).ok_or_else(|| format!("'{}' is not a valid lat,lng pair", text))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let Some(home) = args.home {
        config.home.coordinate = home;
    }
    if args.preview_token.is_some() {
        config.services.preview_token = args.preview_token;
    }

    let services = MapServices::from_config(&config.services)?;
    let screen = MapScreen::builder(services)
        .config(config.clone())
        .spawner(Arc::new(TokioSpawner::current()?))
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.camera.viewport_width as f32,
                config.camera.viewport_height as f32,
            ])
            .with_title("Placemark"),
        ..Default::default()
    };

    eframe::run_native(
        "placemark-app",
        options,
        Box::new(move |_cc| Box::new(PlacemarkApp::new(screen))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))?;

    log::info!("viewer closed");
    Ok(())
}

/// The main application struct
struct PlacemarkApp {
    screen: MapScreen,
    view: ExplorerView,
}

impl PlacemarkApp {
    fn new(screen: MapScreen) -> Self {
        Self {
            screen,
            view: ExplorerView::new(ExplorerStyle::default()),
        }
    }
}

impl eframe::App for PlacemarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view.show(ctx, &mut self.screen);
    }
}
