use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use log::{error, info};

use crate::settings::Settings;
use crate::timeline::Timeline;

mod ui;
mod wheel;

use wheel::{PhaseWheel, WheelResponse};

pub struct PhaseWheelApp {
    settings: Settings,
    state: AppState,
    reload_rx: Option<Receiver<Result<Timeline, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Timeline, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    timeline: Timeline,
    loaded_allocations: Vec<f32>,
    wheel: PhaseWheel,
    selected: Option<usize>,
    adjustable: bool,
    export_path: String,
    export_size: (f32, f32),
    status: Option<String>,
}

impl PhaseWheelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let state = Self::start_load(settings.clone());
        Self {
            settings,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(settings: Settings) -> Receiver<Result<Timeline, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = settings
                .load_timeline()
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(settings: Settings) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(settings),
        }
    }

    fn ready_or_error(&self, result: Result<Timeline, String>) -> AppState {
        match result {
            Ok(timeline) => AppState::Ready(Box::new(ViewModel::new(timeline, &self.settings))),
            Err(message) => {
                error!("timeline load failed: {message}");
                AppState::Error(message)
            }
        }
    }
}

impl eframe::App for PhaseWheelApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading timeline...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(message) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load timeline");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
                if retry {
                    self.state = Self::start_load(self.settings.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let source = self.settings.source_label();
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    info!("reloading timeline from {source}");
                    self.reload_rx = Some(Self::spawn_load(self.settings.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            ctx.request_repaint();
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = self.ready_or_error(result);
        }
    }
}

impl ViewModel {
    fn new(timeline: Timeline, settings: &Settings) -> Self {
        let export_path = settings
            .export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("phase-wheel.svg"))
            .display()
            .to_string();

        let mut wheel = PhaseWheel::new(&timeline);
        wheel.set_adjustable(settings.adjustable);

        Self {
            loaded_allocations: timeline.allocations(),
            selected: timeline.current().map(|_| timeline.current_phase),
            timeline,
            wheel,
            adjustable: settings.adjustable,
            export_path,
            export_size: settings.export_size,
            status: None,
        }
    }

    fn handle_wheel_response(&mut self, response: WheelResponse) {
        if let Some(index) = response.clicked_phase {
            if let Some(phase) = self.timeline.phases.get(index) {
                info!("phase {index} ({}) clicked", phase.name);
            }
            self.selected = Some(index);
        }

        if let Some(allocations) = response.allocations_changed {
            info!("time allocation changed: {allocations:?}");
            self.timeline.set_allocations(&allocations);
        }
    }
}
