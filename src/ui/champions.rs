use std::sync::Arc;

use egui::{CursorIcon, Frame, Id, RichText, Sense};
use tokio::runtime::Handle;

use f1champions::{
    LoadPhase, RemoteChampionsRepository,
    api::ErgastClient,
    champions::{ChampionItem, ChampionsScreenLoader, champions_loader},
    loader::ScreenLoader,
    routes::Screen,
};

use super::{
    CARD_SPACING, CHAMPION_LABEL, CONSTRUCTOR_LABEL, DEFAULT_CARD_CORNER_RADIUS, NavAction,
    PALETTE_CARD, PALETTE_GREY, PALETTE_RED, SEASON_LABEL,
};

pub(crate) struct ChampionsScreen {
    loader: ChampionsScreenLoader,
    requested: bool,
}

impl ChampionsScreen {
    pub(crate) fn new(api: Arc<ErgastClient>) -> Self {
        let repository = Arc::new(RemoteChampionsRepository::new(api));
        Self {
            loader: ScreenLoader::new(champions_loader(repository)),
            requested: false,
        }
    }

    pub(crate) fn show(&mut self, ctx: &egui::Context, runtime: &Handle) -> Option<NavAction> {
        if !self.requested {
            let repaint_ctx = ctx.clone();
            self.loader
                .request((), runtime, move || repaint_ctx.request_repaint());
            self.requested = true;
        }
        self.loader.poll();

        egui::TopBottomPanel::top("champions_top_bar")
            .frame(Frame::new().inner_margin(10))
            .show(ctx, |ui| {
                ui.heading(RichText::new("F1 Champions").color(PALETTE_RED).strong());
            });

        let mut selected_season: Option<String> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = self.loader.state();
            match state.phase() {
                LoadPhase::Loading => {
                    ui.centered_and_justified(|ui| ui.spinner());
                }
                LoadPhase::Failed => {
                    let color = ui.visuals().error_fg_color;
                    let message = state.error_message.clone().unwrap_or_default();
                    ui.centered_and_justified(|ui| ui.label(RichText::new(message).color(color)));
                }
                LoadPhase::Loaded | LoadPhase::Idle => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for item in &state.items {
                                if champion_card(ui, item) {
                                    selected_season = Some(item.season.clone());
                                }
                                ui.add_space(CARD_SPACING);
                            }
                        });
                }
            }
        });

        selected_season.map(|season| NavAction::Push(Screen::SeasonDetails { season }))
    }
}

/// Draws one season card, returns whether it was clicked.
fn champion_card(ui: &mut egui::Ui, item: &ChampionItem) -> bool {
    let card = Frame::new()
        .fill(PALETTE_CARD)
        .corner_radius(DEFAULT_CARD_CORNER_RADIUS)
        .inner_margin(12)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{}: {}", SEASON_LABEL, item.season))
                    .size(16.)
                    .strong(),
            );
            ui.label(format!("{}: {}", CHAMPION_LABEL, item.driver));
            ui.label(
                RichText::new(format!("{}: {}", CONSTRUCTOR_LABEL, item.constructor))
                    .small()
                    .color(PALETTE_GREY),
            );
        });

    let response = ui.interact(
        card.response.rect,
        Id::new(("champion_card", &item.season)),
        Sense::click(),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
    }
    response.clicked()
}
