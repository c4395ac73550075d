//! App shell: view routing, the UI event pump, navigation chrome, and the
//! per-kind grid views.

use anyhow::Context as _;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ResourceKind;
use shared::schema;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::GridModel;
use crate::ui::table;

pub const DEFAULT_API_URL: &str = "https://swapi.dev/api";
const API_URL_ENV: &str = "GALAXY_ARCHIVE_API_URL";

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
    pub initial_view: Option<ResourceKind>,
}

impl StartupConfig {
    /// Flag wins over environment, environment over the built-in default.
    pub fn resolve(
        cli_api_url: Option<&str>,
        initial_view: Option<ResourceKind>,
    ) -> anyhow::Result<Self> {
        Self::resolve_from(cli_api_url, std::env::var(API_URL_ENV).ok(), initial_view)
    }

    fn resolve_from(
        cli_api_url: Option<&str>,
        env_api_url: Option<String>,
        initial_view: Option<ResourceKind>,
    ) -> anyhow::Result<Self> {
        let api_url = cli_api_url
            .map(str::to_string)
            .or(env_api_url.filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Url::parse(&api_url).with_context(|| format!("invalid archive API URL '{api_url}'"))?;
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            initial_view,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Landing,
    Grid(ResourceKind),
}

enum GridPhase {
    Loading,
    Ready,
    Failed(UiError),
}

/// Everything one grid activation owns. Dropped wholesale on teardown;
/// nothing survives into the next activation of the same kind.
struct ActiveGrid {
    kind: ResourceKind,
    generation: u64,
    phase: GridPhase,
    model: GridModel,
}

pub struct ArchiveApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    api_url: String,
    view: AppView,
    active: Option<ActiveGrid>,
    next_generation: u64,

    status: String,
    worker_failure: Option<String>,
}

impl ArchiveApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_url: startup.api_url.clone(),
            view: AppView::Landing,
            active: None,
            next_generation: 0,
            status: "Ready".to_string(),
            worker_failure: None,
        };
        if let Some(kind) = startup.initial_view {
            app.open_grid(kind);
        }
        app
    }

    /// Activate a grid view: fresh model, fresh generation, one fetch run.
    fn open_grid(&mut self, kind: ResourceKind) {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.view = AppView::Grid(kind);
        self.active = Some(ActiveGrid {
            kind,
            generation,
            phase: GridPhase::Loading,
            model: GridModel::new(schema::columns(kind)),
        });
        self.status = format!("Loading {}...", kind.label().to_lowercase());
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchRecords { kind, generation },
            &mut self.status,
        );
    }

    /// Tear the grid down: its accumulator is discarded and the in-flight
    /// run (if any) is cancelled.
    fn open_landing(&mut self) {
        if self.active.take().is_some() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::CancelActiveFetch,
                &mut self.status,
            );
        }
        self.view = AppView::Landing;
        self.status = "Ready".to_string();
    }

    fn navigate(&mut self, view: AppView) {
        if self.view == view {
            return;
        }
        match view {
            AppView::Landing => self.open_landing(),
            AppView::Grid(kind) => self.open_grid(kind),
        }
    }

    fn retry_active(&mut self) {
        if let Some(kind) = self.active.as_ref().map(|grid| grid.kind) {
            self.open_grid(kind);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::RecordsLoaded {
                    kind,
                    generation,
                    records,
                } => {
                    let Some(grid) = self.active.as_mut() else {
                        tracing::debug!(
                            kind = kind.route_segment(),
                            generation,
                            "dropping records for torn-down view"
                        );
                        continue;
                    };
                    if grid.kind != kind || grid.generation != generation {
                        tracing::debug!(
                            kind = kind.route_segment(),
                            generation,
                            active_generation = grid.generation,
                            "dropping stale fetch result"
                        );
                        continue;
                    }
                    self.status = format!(
                        "Loaded {} {} records",
                        records.len(),
                        kind.label().to_lowercase()
                    );
                    grid.model.set_rows(records);
                    grid.phase = GridPhase::Ready;
                }
                UiEvent::FetchFailed {
                    kind,
                    generation,
                    error,
                } => {
                    let Some(grid) = self.active.as_mut() else {
                        continue;
                    };
                    if grid.kind != kind || grid.generation != generation {
                        continue;
                    }
                    self.status =
                        format!("{}: {}", error.category().headline(), error.message());
                    grid.phase = GridPhase::Failed(error);
                }
                UiEvent::WorkerFailed(message) => {
                    self.status = message.clone();
                    self.worker_failure = Some(message);
                }
            }
        }
    }

    fn show_navigation_bar(&mut self, ctx: &egui::Context) {
        let mut target: Option<AppView> = None;
        egui::TopBottomPanel::top("archive_nav_bar")
            .exact_height(32.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let brand = egui::RichText::new("Galaxy Archive").strong();
                    if ui
                        .selectable_label(self.view == AppView::Landing, brand)
                        .clicked()
                    {
                        target = Some(AppView::Landing);
                    }
                    ui.separator();
                    for kind in ResourceKind::ALL {
                        let selected = self.view == AppView::Grid(kind);
                        if ui.selectable_label(selected, kind.label()).clicked() {
                            target = Some(AppView::Grid(kind));
                        }
                    }
                });
            });
        if let Some(view) = target {
            self.navigate(view);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("archive_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(self.api_url.as_str());
                });
            });
        });
    }

    fn show_worker_failure_banner(&self, ctx: &egui::Context) {
        let Some(message) = &self.worker_failure else {
            return;
        };
        egui::TopBottomPanel::top("worker_failure_banner").show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, message);
        });
    }

    fn show_landing(&mut self, ctx: &egui::Context) {
        let mut target: Option<ResourceKind> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading("Welcome to the Galaxy Archive");
                ui.label(
                    "Explore the tables and view details of characters, planets, \
                     and starships across the galaxy.",
                );
                ui.add_space(16.0);
            });
            ui.columns(3, |columns| {
                for (column, kind) in columns.iter_mut().zip(ResourceKind::ALL) {
                    column.group(|ui| {
                        ui.heading(kind.label());
                        ui.label(landing_blurb(kind));
                        ui.add_space(8.0);
                        if ui
                            .button(format!("Browse {}", kind.label().to_lowercase()))
                            .clicked()
                        {
                            target = Some(kind);
                        }
                    });
                }
            });
        });
        if let Some(kind) = target {
            self.open_grid(kind);
        }
    }

    fn show_grid_view(&mut self, ctx: &egui::Context) {
        let mut retry = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(grid) = self.active.as_mut() else {
                return;
            };
            ui.heading(format!("{} Grid", grid.kind.label()));
            ui.add_space(4.0);
            match &grid.phase {
                GridPhase::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!(
                            "Fetching every {} page from the archive...",
                            grid.kind.label().to_lowercase()
                        ));
                    });
                    ui.add_space(8.0);
                    // Empty table until the whole paginated fetch lands.
                    table::show_grid(ui, grid.kind.route_segment(), &mut grid.model);
                }
                GridPhase::Failed(error) => {
                    show_error_banner(ui, error, &mut retry);
                }
                GridPhase::Ready => {
                    table::show_grid(ui, grid.kind.route_segment(), &mut grid.model);
                }
            }
        });
        if retry {
            self.retry_active();
        }
    }
}

fn landing_blurb(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::People => {
            "Heights, masses, and appearances of the archive's characters."
        }
        ResourceKind::Planets => {
            "Populations, climates, and orbits of the many recorded worlds."
        }
        ResourceKind::Starships => {
            "Classes, crews, and costs of the starships on record."
        }
    }
}

fn show_error_banner(ui: &mut egui::Ui, error: &UiError, retry: &mut bool) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.colored_label(
                ui.visuals().error_fg_color,
                egui::RichText::new(error.category().headline()).strong(),
            );
            ui.label(error.message());
            if let Some(hint) = error.hint() {
                ui.small(hint);
            }
            ui.add_space(4.0);
            if ui.button("Retry").clicked() {
                *retry = true;
            }
        });
}

impl eframe::App for ArchiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_worker_failure_banner(ctx);
        self.show_navigation_bar(ctx);
        self.show_status_bar(ctx);
        match self.view {
            AppView::Landing => self.show_landing(ctx),
            AppView::Grid(_) => self.show_grid_view(ctx),
        }

        // Worker events arrive between frames; poll faster while a fetch
        // is in flight so the commit shows up promptly.
        let loading = matches!(
            self.active.as_ref().map(|grid| &grid.phase),
            Some(GridPhase::Loading)
        );
        if loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(33));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
