use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::corpus::{Corpus, load_corpus};
use crate::engine::{DynamicState, PlaybackCursor, SceneGraph, SpeakerPalette, TickTimer};

mod canvas;
mod controls;
mod interaction;
mod panels;
mod render_utils;

pub struct DramatisApp {
    data_path: String,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Corpus, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    corpus: Corpus,
    play_index: usize,
    cursor: PlaybackCursor,
    dynamics: DynamicState,
    timer: TickTimer,
    speed_ms: u32,
    palette: SpeakerPalette,
    scene_graph: SceneGraph,
    /// (play, scene) the graph and dynamics were last built for.
    graph_scene: Option<(usize, usize)>,
    /// (play, scene, turn) most recently fed into the dynamic state.
    last_observed: Option<(usize, usize, usize)>,
    search: String,
    viewport: Vec2,
}

impl DramatisApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: String) -> Self {
        let state = Self::start_load(data_path.clone());
        Self { data_path, state }
    }

    fn spawn_load(data_path: String) -> Receiver<Result<Corpus, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_corpus(&data_path).map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for DramatisApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(corpus) => AppState::Ready(Box::new(ViewModel::new(corpus))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading play corpus...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load play corpus");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
