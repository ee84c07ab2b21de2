//! Interactive viewer for a springbody scenario
//!
//! The body is ticked on a dedicated physics thread through a
//! [`SharedBody`], while the egui frame loop only reads it for drawing. The
//! disc can be grabbed and thrown with the mouse, parameters can be edited in
//! the side panel, and the scenario file is reloaded when it changes.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use springbody_core::{
    round_display, BodyConfig, DragGesture, Parameter, ParameterPolicy, PhysicsDriver,
    SharedBody, Vec2,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sleep between physics ticks
const PHYSICS_INTERVAL: Duration = Duration::from_millis(4);

/// World units visible across the shorter side of the canvas
const WORLD_RANGE: f32 = 40.0;

const DISC_RADIUS: f32 = 12.0;

/// Open the viewer on `config`, watching `config_path` for changes when given
pub fn run(
    config_path: Option<PathBuf>,
    config: BodyConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "springbody",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(config_path, config, cc)))),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Ticks the shared body from wall-clock time until stopped
struct PhysicsLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PhysicsLoop {
    fn spawn(body: SharedBody, active: Arc<AtomicBool>, max_timestep: f32) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let handle = {
            let running = running.clone();
            thread::spawn(move || {
                let mut driver = PhysicsDriver::new(max_timestep);
                while running.load(Ordering::Relaxed) {
                    if active.load(Ordering::Relaxed) {
                        if let Err(e) = driver.advance_shared(&body, Instant::now()) {
                            tracing::error!("physics step failed: {}", e);
                        }
                    } else {
                        driver.pause();
                    }
                    thread::sleep(PHYSICS_INTERVAL);
                }
            })
        };

        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PhysicsLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Text typed into a parameter field that has not been committed yet
struct StagedEdit {
    text: String,
    valid: bool,
}

pub struct ViewerApp {
    config_path: Option<PathBuf>,
    body: SharedBody,
    policy: ParameterPolicy,
    /// User wants the simulation running
    playing: bool,
    /// Physics thread may tick; off while paused or dragging
    active: Arc<AtomicBool>,
    physics: PhysicsLoop,
    gesture: Option<DragGesture>,
    edits: HashMap<Parameter, StagedEdit>,
    last_load_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        config_path: Option<PathBuf>,
        config: BodyConfig,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                tracing::warn!(path = %path.display(), "not watching scenario: {}", e);
            }
        }

        // The scenario was validated on load
        let body = SharedBody::new(config.build_body().unwrap_or_default());
        let active = Arc::new(AtomicBool::new(true));
        let physics = PhysicsLoop::spawn(body.clone(), active.clone(), config.driver.max_timestep);

        Self {
            config_path,
            policy: config.policy(),
            body,
            playing: true,
            active,
            physics,
            gesture: None,
            edits: HashMap::new(),
            last_load_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };

        match BodyConfig::load(&path) {
            Ok(config) => {
                self.physics.stop();
                if let Ok(body) = config.build_body() {
                    self.body.replace(body);
                }
                self.policy = config.policy();
                self.physics = PhysicsLoop::spawn(
                    self.body.clone(),
                    self.active.clone(),
                    config.driver.max_timestep,
                );
                self.edits.clear();
                self.last_load_error = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "scenario reload failed: {}", e);
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if self
                        .config_path
                        .as_ref()
                        .is_some_and(|path| paths.contains(path))
                    {
                        needs_reload = true;
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_config();
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.active.store(playing && self.gesture.is_none(), Ordering::Relaxed);
    }

    fn reset_motion(&mut self) {
        self.body.with(|body| body.reset_motion());
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.playing { "⏸ Stop" } else { "▶ Resume" };
            if ui.button(label).clicked() {
                self.set_playing(!self.playing);
            }
            if ui.button("⏮ Reset position").clicked() {
                self.reset_motion();
            }
            if self.config_path.is_some() && ui.button("⟳ Reload").clicked() {
                self.reload_config();
            }
        });
    }

    fn state_panel(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.body.snapshot();

        egui::Grid::new("state").num_columns(3).show(ui, |ui| {
            ui.label("position");
            ui.label(format!("{}", round_display(snapshot.position_x())));
            ui.label(format!("{}", round_display(snapshot.position_y())));
            ui.end_row();

            ui.label("velocity");
            ui.label(format!("{}", round_display(snapshot.velocity_x())));
            ui.label(format!("{}", round_display(snapshot.velocity_y())));
            ui.end_row();
        });

        ui.separator();

        let policy = self.policy;
        egui::Grid::new("parameters").num_columns(2).show(ui, |ui| {
            for param in Parameter::ALL {
                ui.label(param.label());

                // A field being edited shows what the user typed, not the body
                let (mut text, valid) = match self.edits.get(&param) {
                    Some(edit) => (edit.text.clone(), edit.valid),
                    None => (round_display(param.read(&snapshot)).to_string(), true),
                };

                let mut field = egui::TextEdit::singleline(&mut text).desired_width(80.0);
                if !valid {
                    field = field.text_color(egui::Color32::RED);
                }
                let response = ui.add(field);

                if response.changed() {
                    let valid = self
                        .body
                        .with(|body| policy.apply_text(body, param, &text))
                        .is_ok();
                    self.edits.insert(param, StagedEdit { text, valid });
                }
                if response.lost_focus() {
                    self.edits.remove(&param);
                }
                ui.end_row();
            }
        });

        if let Some(ref error) = self.last_load_error {
            ui.separator();
            ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let response = ui.allocate_rect(rect, egui::Sense::drag());

        let center = rect.center();
        let scale = (rect.width().min(rect.height()) / WORLD_RANGE) * 0.9;
        let to_screen = |p: Vec2| center + egui::vec2(p.x * scale, -p.y * scale);
        let to_world = |p: egui::Pos2| {
            Vec2::new((p.x - center.x) / scale, -(p.y - center.y) / scale)
        };

        let now = Instant::now();
        let snapshot = self.body.snapshot();
        let disc = to_screen(snapshot.position());

        if response.drag_started() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if pointer.distance(disc) <= DISC_RADIUS * 1.5 {
                    let position = to_world(pointer);
                    self.gesture = Some(DragGesture::begin(position, now));
                    self.active.store(false, Ordering::Relaxed);
                    self.body.set_position(position.x, position.y);
                }
            }
        }

        if response.drag_stopped() {
            // Release measures from the previous frame, so it must not call frame() first
            if let Some(mut gesture) = self.gesture.take() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    gesture.move_to(to_world(pointer));
                }
                let position = gesture.position();
                let velocity = gesture.release(now);
                self.body.with(|body| {
                    body.set_position(position.x, position.y);
                    body.set_velocity(velocity.x, velocity.y);
                });
                self.set_playing(self.playing);
            }
        } else if let Some(gesture) = self.gesture.as_mut() {
            if let Some(pointer) = response.interact_pointer_pos() {
                gesture.move_to(to_world(pointer));
            }
            let position = gesture.position();
            let velocity = gesture.frame(now);
            self.body.with(|body| {
                body.set_position(position.x, position.y);
                body.set_velocity(velocity.x, velocity.y);
            });
        }

        let snapshot = self.body.snapshot();
        let painter = ui.painter();
        let anchor = to_screen(snapshot.spring_equilibrium_position());
        let disc = to_screen(snapshot.position());

        painter.line_segment([anchor, disc], egui::Stroke::new(1.0, egui::Color32::GRAY));
        painter.circle_filled(anchor, 3.0, egui::Color32::GRAY);
        painter.circle_filled(disc, DISC_RADIUS, egui::Color32::LIGHT_BLUE);
        painter.circle_stroke(disc, DISC_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLUE));
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::SidePanel::right("state")
            .resizable(false)
            .show(ctx, |ui| self.state_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        // The physics thread moves the body between frames
        ctx.request_repaint();
    }
}
