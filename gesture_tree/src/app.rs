//! Frame context and the application loops.
//!
//! `AppState` owns the adapter, the state machine, the camera and the scene.
//! One call to [`AppState::tick`] is one frame: poll the adapter, feed the
//! state machine, advance progress, move the camera, rewrite every transform
//! buffer.  Nothing else writes to any of these.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::adapter::{AdapterStats, AdapterStatus, GestureAdapter};
use crate::camera::{CameraController, CameraMode, CameraPose};
use crate::choreography::{ChoreographyState, StateMachine, TreeState};
use crate::config::{BackendKind, Settings};
use crate::error::{AppError, InitError};
use crate::gesture::{GestureBackend, GestureLabel, GestureSample, ScriptedBackend, SimBackend, SimInput};
use crate::scene::Scene;
use crate::visualizer::Visualizer;

/// Fixed step used by headless runs.
pub const HEADLESS_DT: f32 = 1.0 / 60.0;

/// Longest step a single windowed frame may take.
const MAX_FRAME_DT: f32 = 0.25;

/// Length and half-period of the built-in open/close script.
const SCRIPT_FRAMES: u64 = 3600;
const SCRIPT_PERIOD: u64 = 240;

// ════════════════════════════════════════════════════════════════════════════
// Backend selection
// ════════════════════════════════════════════════════════════════════════════

/// Build the backend named by `settings.backend`.
///
/// `sim` is the receiving end of the visualizer's input channel; without a
/// window the simulated hand is replaced by the scripted cycle.
pub fn select_backend(
    settings: &Settings,
    sim:      Option<Receiver<SimInput>>,
) -> Result<Box<dyn GestureBackend>, AppError> {
    match (settings.backend, sim) {
        (BackendKind::Sim, Some(rx)) => Ok(Box::new(SimBackend::new(
            rx,
            Duration::from_millis(settings.sim_init_delay_ms),
        ))),
        (BackendKind::Sim, None) => {
            info!("no window for the simulated hand, using the scripted cycle");
            Ok(Box::new(ScriptedBackend::cycle(SCRIPT_FRAMES, SCRIPT_PERIOD)))
        }
        (BackendKind::Scripted, _) => Ok(Box::new(ScriptedBackend::cycle(SCRIPT_FRAMES, SCRIPT_PERIOD))),
        #[cfg(feature = "leap")]
        (BackendKind::Leap, _) => Ok(Box::new(crate::gesture::LeapBackend::new())),
        #[cfg(not(feature = "leap"))]
        (BackendKind::Leap, _) => Err(AppError::Config(
            "the leap backend needs a build with `--features leap`".into(),
        )),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UI status
// ════════════════════════════════════════════════════════════════════════════

/// Read-only view for the status bar.
#[derive(Clone, Debug, PartialEq)]
pub struct UiStatus {
    pub gesture_active: bool,
    /// Set once if the gesture system could not start.
    pub init_error:     Option<InitError>,
    pub state:          TreeState,
    pub progress:       f32,
    pub label:          GestureLabel,
    pub confidence:     f32,
    pub camera_mode:    CameraMode,
}

impl UiStatus {
    /// Single status line.
    pub fn line(&self) -> String {
        if let Some(e) = &self.init_error {
            return format!("VISION SYSTEM UNAVAILABLE: {}  STATE {}", e, self.state.name());
        }
        if !self.gesture_active {
            return "INITIALIZING VISION SYSTEM...".to_string();
        }
        format!(
            "STATE {}  PROGRESS {:.2}  CAMERA {}  HAND {} {:.2}",
            self.state.name(),
            self.progress,
            self.camera_mode.name(),
            self.label.name(),
            self.confidence,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    adapter:     GestureAdapter,
    machine:     StateMachine,
    camera:      CameraController,
    scene:       Scene,
    /// Seconds since the first frame; drives idle motion.
    elapsed:     f32,
    last_sample: Option<GestureSample>,
    frames:      u64,
    transitions: u64,
}

impl AppState {
    /// Start the adapter first so its initialization overlaps scene
    /// generation.
    pub fn new(settings: &Settings, backend: Box<dyn GestureBackend>) -> Result<Self, AppError> {
        let adapter = GestureAdapter::start(backend, settings.classifier());

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let scene = Scene::build(&mut rng, &settings.scene())?;
        info!(
            groups   = scene.groups().len(),
            elements = scene.element_count(),
            seed     = ?settings.seed,
            "scene built"
        );

        let mut app = AppState {
            adapter,
            machine:     StateMachine::new(settings.machine()),
            camera:      CameraController::new(settings.camera()),
            scene,
            elapsed:     0.0,
            last_sample: None,
            frames:      0,
            transitions: 0,
        };
        let progress = app.machine.progress();
        app.scene.update(progress, 0.0);
        Ok(app)
    }

    /// Advance one frame by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> ChoreographyState {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        if let Some(sample) = self.adapter.poll() {
            if self.machine.observe(&sample).is_some() {
                self.transitions += 1;
            }
            self.last_sample = Some(sample);
        }
        let pointer = if self.adapter.is_active() {
            self.last_sample.and_then(|s| s.pointer())
        } else {
            None
        };

        self.elapsed += dt;
        let progress = self.machine.advance(dt);
        self.camera.update(pointer, dt);
        self.scene.update(progress, self.elapsed);
        self.frames += 1;
        self.machine.snapshot()
    }

    pub fn status(&self) -> UiStatus {
        let init_error = match self.adapter.status() {
            AdapterStatus::Failed(e) => Some(e.clone()),
            _                        => None,
        };
        let (label, confidence) = self
            .last_sample
            .map_or((GestureLabel::None, 0.0), |s| (s.label, s.confidence));
        let snap = self.machine.snapshot();
        UiStatus {
            gesture_active: self.adapter.is_active(),
            init_error,
            state:          snap.state,
            progress:       snap.progress,
            label,
            confidence,
            camera_mode:    self.camera.settings().mode,
        }
    }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn camera_pose(&self) -> CameraPose { self.camera.pose() }
    pub fn choreography(&self) -> ChoreographyState { self.machine.snapshot() }
    pub fn adapter_stats(&self) -> AdapterStats { self.adapter.stats() }
    pub fn frames(&self) -> u64 { self.frames }
    pub fn transitions(&self) -> u64 { self.transitions }
    pub fn elapsed(&self) -> f32 { self.elapsed }

    /// Close the gesture backend.  Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.adapter.shutdown();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the windowed loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the visualizer and run until the window closes.
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let backend = select_backend(settings, Some(sim_rx))?;

    let mut vis = Visualizer::new(settings.window_width, settings.window_height, sim_tx)?;
    let mut app = AppState::new(settings, backend)?;
    info!(width = settings.window_width, height = settings.window_height, "window open");

    let mut last = Instant::now();
    while vis.is_open() {
        if !vis.poll_input() { break; }

        let now = Instant::now();
        let dt  = now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
        last = now;

        app.tick(dt);
        vis.render(app.scene(), app.camera_pose(), &app.status());
    }

    let snap = app.choreography();
    info!(
        frames   = app.frames(),
        state    = snap.state.name(),
        progress = snap.progress,
        "window closed"
    );
    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// run_headless() — fixed-step loop without a window
// ════════════════════════════════════════════════════════════════════════════

/// What a headless run ended with.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSummary {
    pub frames:         u64,
    pub transitions:    u64,
    pub final_state:    ChoreographyState,
    pub camera:         Vec3,
    pub gesture_active: bool,
    pub stats:          AdapterStats,
}

/// Run `frames` frames at [`HEADLESS_DT`] and log a summary.
pub fn run_headless(settings: &Settings, frames: u64) -> Result<HeadlessSummary, AppError> {
    let backend = select_backend(settings, None)?;
    let mut app = AppState::new(settings, backend)?;

    for i in 0..frames {
        let snap = app.tick(HEADLESS_DT);
        if i % 60 == 0 {
            debug!(frame = i, state = snap.state.name(), progress = snap.progress, "headless tick");
        }
    }

    let summary = HeadlessSummary {
        frames:         app.frames(),
        transitions:    app.transitions(),
        final_state:    app.choreography(),
        camera:         app.camera_pose().position,
        gesture_active: app.status().gesture_active,
        stats:          app.adapter_stats(),
    };
    info!(
        frames      = summary.frames,
        transitions = summary.transitions,
        state       = summary.final_state.state.name(),
        progress    = summary.final_state.progress,
        camera      = ?summary.camera,
        classified  = summary.stats.classified,
        errors      = summary.stats.errors,
        "headless run finished"
    );
    app.shutdown();
    Ok(summary)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::ScriptedFrame;
    use crate::scene::{FOLIAGE, STAR};
    use glam::Vec2;
    use std::thread;

    const DT: f32 = 1.0 / 60.0;

    fn small() -> Settings {
        Settings {
            foliage_count: 200,
            light_count:   20,
            dust_count:    40,
            seed:          Some(11),
            ..Settings::default()
        }
    }

    fn app_with(frames: Vec<ScriptedFrame>) -> AppState {
        AppState::new(&small(), Box::new(ScriptedBackend::new(frames))).unwrap()
    }

    /// Tick until `done` holds, giving the init thread time to report.
    fn tick_until(app: &mut AppState, done: impl Fn(&AppState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) && Instant::now() < deadline {
            app.tick(DT);
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn starts_formed_and_initializing() {
        let backend = ScriptedBackend::new(vec![]).with_init_delay(Duration::from_millis(300));
        let app = AppState::new(&small(), Box::new(backend)).unwrap();
        let st = app.status();
        assert_eq!((st.state, st.progress), (TreeState::Formed, 1.0));
        assert!(!st.gesture_active);
        assert_eq!(st.line(), "INITIALIZING VISION SYSTEM...");
        let star = app.scene().group(STAR).unwrap().transforms()[0];
        assert!((star.position.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn open_palm_disperses_the_tree() {
        let mut app = app_with(vec![ScriptedFrame::gesture(1, "Open_Palm", 0.9, Vec2::splat(0.5))]);
        tick_until(&mut app, |a| a.choreography().state == TreeState::Chaos);
        assert_eq!(app.transitions(), 1);
        for _ in 0..180 { app.tick(DT); }
        assert!(app.choreography().progress < 0.01);

        let foliage = app.scene().group(FOLIAGE).unwrap();
        for (t, d) in foliage.transforms().iter().zip(foliage.pair().dispersed().iter()) {
            assert!((t.position - *d).length() < 0.2);
        }
        let st = app.status();
        assert!(st.gesture_active);
        assert_eq!(st.label, GestureLabel::Open);
        assert!(st.line().starts_with("STATE CHAOS"));
    }

    #[test]
    fn pointer_motion_orbits_camera() {
        let mut app = app_with(vec![
            ScriptedFrame::gesture(1, "None", 0.5, Vec2::new(0.5, 0.5)),
            ScriptedFrame::gesture(2, "None", 0.5, Vec2::new(0.6, 0.5)),
        ]);
        tick_until(&mut app, |a| a.adapter_stats().classified == 2);
        for _ in 0..10 { app.tick(DT); }
        assert!((app.camera_pose().orbit_angle + 0.5).abs() < 1e-4);
        assert_eq!(app.choreography().state, TreeState::Formed);
    }

    #[test]
    fn init_failure_keeps_default_state() {
        let backend = ScriptedBackend::new(vec![ScriptedFrame::gesture(1, "Open_Palm", 0.9, Vec2::ZERO)])
            .failing(InitError::ModelLoad("missing".into()));
        let mut app = AppState::new(&small(), Box::new(backend)).unwrap();
        tick_until(&mut app, |a| a.status().init_error.is_some());
        for _ in 0..120 { app.tick(DT); }

        let st = app.status();
        assert!(!st.gesture_active);
        assert_eq!(st.init_error, Some(InitError::ModelLoad("missing".into())));
        assert_eq!((st.state, st.progress), (TreeState::Formed, 1.0));
        assert!(st.line().starts_with("VISION SYSTEM UNAVAILABLE"));
    }

    #[test]
    fn bad_dt_is_ignored() {
        let mut app = app_with(vec![]);
        app.tick(f32::NAN);
        app.tick(-1.0);
        assert_eq!(app.elapsed(), 0.0);
        assert_eq!(app.frames(), 2);
    }

    #[test]
    fn headless_runs_every_frame() {
        let settings = Settings { backend: BackendKind::Scripted, ..small() };
        let summary = run_headless(&settings, 120).unwrap();
        assert_eq!(summary.frames, 120);
        assert!((0.0..=1.0).contains(&summary.final_state.progress));
    }

    #[cfg(not(feature = "leap"))]
    #[test]
    fn leap_needs_feature() {
        let settings = Settings { backend: BackendKind::Leap, ..Settings::default() };
        assert!(matches!(select_backend(&settings, None), Err(AppError::Config(_))));
    }
}
