use std::sync::Arc;

use egui::{Frame, Key, RichText};
use egui_extras::{Column, TableBuilder};
use tokio::runtime::Handle;

use f1champions::{
    LoadPhase, RaceItem, RemoteSeasonDetailsRepository,
    api::ErgastClient,
    loader::ScreenLoader,
    season_details::{SeasonDetailsScreenLoader, season_details_loader},
};

use super::{CONSTRUCTOR_LABEL, NavAction, PALETTE_GREY, ROUND_LABEL, WINNER_LABEL};

const HEADER_HEIGHT: f32 = 22.;
const ROW_HEIGHT: f32 = 38.;

pub(crate) struct SeasonDetailsScreen {
    season: String,
    loader: SeasonDetailsScreenLoader,
    requested: bool,
}

impl SeasonDetailsScreen {
    pub(crate) fn new(season: String, api: Arc<ErgastClient>) -> Self {
        let repository = Arc::new(RemoteSeasonDetailsRepository::new(api));
        Self {
            season,
            loader: ScreenLoader::new(season_details_loader(repository)),
            requested: false,
        }
    }

    pub(crate) fn show(&mut self, ctx: &egui::Context, runtime: &Handle) -> Option<NavAction> {
        if !self.requested {
            let repaint_ctx = ctx.clone();
            self.loader.request(self.season.clone(), runtime, move || {
                repaint_ctx.request_repaint()
            });
            self.requested = true;
        }
        self.loader.poll();

        let mut action = None;
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            action = Some(NavAction::Back);
        }

        egui::TopBottomPanel::top("season_details_top_bar")
            .frame(Frame::new().inner_margin(10))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⬅ Back").clicked() {
                        action = Some(NavAction::Back);
                    }
                    let title = self.loader.state().title.clone().unwrap_or_default();
                    ui.heading(RichText::new(title).strong());
                });
            });

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
                LoadPhase::Loaded | LoadPhase::Idle => races_table(ui, &state.items),
            }
        });

        action
    }
}

fn races_table(ui: &mut egui::Ui, races: &[RaceItem]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto().at_least(160.))
        .column(Column::auto())
        .column(Column::remainder())
        .header(HEADER_HEIGHT, |mut header| {
            for name in [ROUND_LABEL, "Grand Prix", WINNER_LABEL, CONSTRUCTOR_LABEL] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for race in races {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(race.round.as_str());
                    });
                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.label(race.race_name.as_str());
                            ui.label(RichText::new(race.date.as_str()).small().color(PALETTE_GREY));
                        });
                    });
                    row.col(|ui| {
                        ui.label(race.winner_name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(race.constructor_name.as_str());
                    });
                });
            }
        });
}
