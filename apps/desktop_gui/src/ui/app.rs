//! Panel shell: activity checkbox rows, preset actions, run submission, and
//! the modal validation alert.

use catalog::domain::{builtin_activities, tier_for_position, ActivitySummary, BASIC_SPLIT};
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use selection::{
    BlockingNotifier, CheckboxGroup, Form, SelectionController, SubmitDecision, ACTIVITY_GROUP,
};
use serde::{Deserialize, Serialize};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_submit_failure, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "indexer_panel_settings";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
/// Name of the single run form discovered at startup.
const RUN_FORM: &str = "run";
const CONSOLE_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedPanelSettings {
    pub server_url: String,
}

impl Default for PersistedPanelSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

struct ConsoleLine {
    stamp: String,
    text: String,
}

/// Routes the validation block into the panel's modal alert slot.
struct ModalNotifier<'a> {
    slot: &'a mut Option<String>,
}

impl BlockingNotifier for ModalNotifier<'_> {
    fn show_blocking_message(&mut self, text: &str) {
        *self.slot = Some(text.to_string());
    }
}

pub struct ControlPanelApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    catalog: Vec<ActivitySummary>,
    controller: SelectionController,

    alert: Option<String>,
    status: String,
    status_banner: Option<StatusBanner>,
    console: Vec<ConsoleLine>,
}

impl ControlPanelApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url_override: Option<String>,
        persisted_settings: Option<PersistedPanelSettings>,
    ) -> Self {
        let settings = persisted_settings.unwrap_or_default();
        let server_url = server_url_override.unwrap_or(settings.server_url);

        let catalog = builtin_activities();
        let group = CheckboxGroup::new(
            catalog
                .iter()
                .map(|activity| (activity.id, activity.title.clone())),
        );
        // The run form is discovered exactly once, before the first frame, so
        // validation sees the complete set of checkboxes.
        let controller =
            SelectionController::initialize(vec![
                Form::new(RUN_FORM).with_group(ACTIVITY_GROUP, group)
            ]);

        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            catalog,
            controller,
            alert: None,
            status: "Starting backend worker".to_string(),
            status_banner: None,
            console: Vec::new(),
        };
        app.push_console("Select activities and press Run.");
        app
    }

    fn push_console(&mut self, text: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S").to_string();
        self.console.push(ConsoleLine {
            stamp,
            text: text.into(),
        });
        if self.console.len() > CONSOLE_CAPACITY {
            let excess = self.console.len() - CONSOLE_CAPACITY;
            self.console.drain(..excess);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SubmissionAccepted { activity_count } => {
                    self.status = format!("Run accepted: {activity_count} activities submitted");
                    self.status_banner = None;
                    self.push_console(format!(
                        "Activity runner accepted {activity_count} activities"
                    ));
                }
                UiEvent::ServerProbed { detail } => {
                    self.status = detail.clone();
                    self.push_console(format!("Server check ok: {detail}"));
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.status = if err.context() == UiErrorContext::Submit {
                        classify_submit_failure(err.message())
                    } else {
                        format!("{} error: {}", err.category().label(), err.message())
                    };
                    if matches!(
                        err.context(),
                        UiErrorContext::Submit | UiErrorContext::BackendStartup
                    ) {
                        self.status_banner = Some(StatusBanner {
                            message: self.status.clone(),
                        });
                    }
                    self.push_console(self.status.clone());
                }
            }
        }
    }

    fn try_submit(&mut self) {
        let decision = {
            let mut notifier = ModalNotifier {
                slot: &mut self.alert,
            };
            self.controller.submit(RUN_FORM, &mut notifier)
        };

        match decision {
            Ok(SubmitDecision::Proceed(request)) => {
                let count = request.activities.len();
                self.push_console(format!("Submitting {count} selected activities"));
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SubmitRun {
                        server_url: self.server_url.trim().to_string(),
                        request,
                    },
                    &mut self.status,
                );
            }
            Ok(SubmitDecision::Blocked) => {
                self.status = "Run blocked: no activities selected".to_string();
                self.push_console("Run blocked: no activities selected");
            }
            Err(err) => {
                self.status = format!("Selection error: {err}");
            }
        }
    }

    fn probe_server(&mut self) {
        self.push_console(format!("Checking {}", self.server_url.trim()));
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::ProbeServer {
                server_url: self.server_url.trim().to_string(),
            },
            &mut self.status,
        );
    }

    fn preset_labels(group_len: usize) -> (String, String) {
        (
            format!("Basic (1-{BASIC_SPLIT})"),
            format!("Advanced ({}-{group_len})", BASIC_SPLIT + 1),
        )
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::group(ui.style())
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_alert_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Activity selection")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.alert = None;
        }
    }

    fn show_preset_row(&mut self, ui: &mut egui::Ui) {
        let group_len = self
            .controller
            .form(RUN_FORM)
            .ok()
            .and_then(|form| form.group(ACTIVITY_GROUP))
            .map(|group| group.len())
            .unwrap_or(0);
        let (basic_label, advanced_label) = Self::preset_labels(group_len);

        ui.horizontal(|ui| {
            if let Ok(form) = self.controller.form_mut(RUN_FORM) {
                if let Some(group) = form.group_mut(ACTIVITY_GROUP) {
                    if ui.button("Select All").clicked() {
                        group.select_all();
                    }
                    if ui.button("Deselect All").clicked() {
                        group.deselect_all();
                    }
                    if ui.button(&basic_label).clicked() {
                        group.select_basic();
                    }
                    if ui.button(&advanced_label).clicked() {
                        group.select_advanced();
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let run = egui::Button::new(
                    egui::RichText::new("Run Selected Activities").strong(),
                );
                if ui.add(run).clicked() {
                    self.try_submit();
                }
            });
        });
    }

    fn show_activity_rows(&mut self, ui: &mut egui::Ui) {
        let Ok(form) = self.controller.form_mut(RUN_FORM) else {
            return;
        };
        let Some(group) = form.group_mut(ACTIVITY_GROUP) else {
            return;
        };

        for (position, (entry, info)) in group
            .entries_mut()
            .iter_mut()
            .zip(self.catalog.iter())
            .enumerate()
        {
            ui.horizontal(|ui| {
                ui.monospace(format!("{:>2}", entry.id.0));
                ui.checkbox(
                    &mut entry.checked,
                    egui::RichText::new(&entry.label).strong(),
                );
                ui.weak(tier_for_position(position).label());
            });
            ui.horizontal(|ui| {
                ui.add_space(28.0);
                ui.small(&info.summary);
            });
            ui.add_space(4.0);
        }
    }
}

impl eframe::App for ControlPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("HTML Text Indexer");
            ui.weak("Activity control panel");
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Server URL");
                ui.add(
                    egui::TextEdit::singleline(&mut self.server_url)
                        .desired_width(280.0)
                        .hint_text(DEFAULT_SERVER_URL),
                );
                if ui.button("Check server").clicked() {
                    self.probe_server();
                }
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("console").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.label(egui::RichText::new(&self.status).weak());
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .max_height(120.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.console {
                        ui.horizontal(|ui| {
                            ui.monospace(format!("[{}]", line.stamp));
                            ui.label(&line.text);
                        });
                    }
                });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // The validation alert is blocking: the panel stays inert until
            // it is dismissed.
            ui.add_enabled_ui(self.alert.is_none(), |ui| {
                self.show_status_banner(ui);
                self.show_preset_row(ui);
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.show_activity_rows(ui);
                    });
            });
        });

        self.show_alert_window(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedPanelSettings {
            server_url: self.server_url.trim().to_string(),
        };
        if let Ok(text) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}
