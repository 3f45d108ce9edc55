use std::sync::Arc;

use egui::{Color32, Vec2, Visuals, style::Widgets};
use log::{error, info};
use tokio::runtime::Handle;

use f1champions::{api::ErgastClient, config::AppConfig, routes::Screen};

mod champions;
mod season_details;

use champions::ChampionsScreen;
use season_details::SeasonDetailsScreen;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(16, 16, 20);
pub(crate) const PALETTE_CARD: Color32 = Color32::from_rgb(36, 36, 44);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(225, 6, 0);
pub(crate) const PALETTE_GREY: Color32 = Color32::from_rgb(160, 160, 170);

pub(crate) const DEFAULT_CARD_CORNER_RADIUS: u8 = 8;
pub(crate) const CARD_SPACING: f32 = 8.;

pub(crate) const SEASON_LABEL: &str = "Season";
pub(crate) const CHAMPION_LABEL: &str = "Champion";
pub(crate) const CONSTRUCTOR_LABEL: &str = "Constructor";
pub(crate) const ROUND_LABEL: &str = "Round";
pub(crate) const WINNER_LABEL: &str = "Winner";

/// What a screen asks the navigator to do after a frame.
pub(crate) enum NavAction {
    Push(Screen),
    Back,
}

enum ScreenState {
    Champions(ChampionsScreen),
    SeasonDetails(SeasonDetailsScreen),
}

/// `F1ChampionsApp` renders the screen on top of the navigation stack.
///
/// Every screen owns its loader, so popping a screen drops its state and
/// cancels a fetch that is still running.
pub struct F1ChampionsApp {
    window_size: Option<Vec2>,
    runtime: Handle,
    api: Arc<ErgastClient>,
    stack: Vec<ScreenState>,
}

impl F1ChampionsApp {
    pub fn new(runtime: Handle, api: Arc<ErgastClient>, cc: &eframe::CreationContext<'_>) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_RED,
            faint_bg_color: PALETTE_CARD,
            panel_fill: PALETTE_BLACK,
            window_fill: PALETTE_BLACK,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let mut app = Self {
            window_size: None,
            runtime,
            api,
            stack: Vec::new(),
        };
        app.navigate(NavAction::Push(Screen::Champions));
        app
    }

    fn open(&self, screen: &Screen) -> ScreenState {
        match screen {
            Screen::Champions => ScreenState::Champions(ChampionsScreen::new(Arc::clone(&self.api))),
            Screen::SeasonDetails { season } => ScreenState::SeasonDetails(
                SeasonDetailsScreen::new(season.clone(), Arc::clone(&self.api)),
            ),
        }
    }

    fn navigate(&mut self, action: NavAction) {
        match action {
            NavAction::Push(screen) => {
                info!("Navigating to {}", screen);
                let state = self.open(&screen);
                self.stack.push(state);
            }
            // the root screen stays
            NavAction::Back if self.stack.len() > 1 => {
                info!("Navigating back");
                self.stack.pop();
            }
            NavAction::Back => {}
        }
    }
}

impl eframe::App for F1ChampionsApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let Some(window_size) = self.window_size else {
            return;
        };
        // only the window size is written back, command line overrides stay out of the file
        let mut app_config = match AppConfig::from_local_file() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                error!("Error while reading config file: {}", e);
                return;
            }
        };
        app_config.window_width = window_size.x;
        app_config.window_height = window_size.y;
        if let Err(e) = app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(inner_rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.window_size = Some(inner_rect.size());
        }

        let action = match self.stack.last_mut() {
            Some(ScreenState::Champions(screen)) => screen.show(ctx, &self.runtime),
            Some(ScreenState::SeasonDetails(screen)) => screen.show(ctx, &self.runtime),
            None => None,
        };
        if let Some(action) = action {
            self.navigate(action);
            ctx.request_repaint();
        }
    }
}
