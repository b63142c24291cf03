//! Sparkler Night headless driver
//!
//! Runs the scene with a scripted pointer (or a replayed hand recording),
//! builds the frame meshes and logs what happens. Browser/canvas wiring
//! lives outside this crate.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Instant;

    use glam::Vec2;
    use sparkler_night::consts::*;
    use sparkler_night::input::{HandLandmarks, Pose, ReplayTracker};
    use sparkler_night::renderer::{MeshSurface, draw_fps, draw_scene};
    use sparkler_night::sim::{Scene, SceneEvent, TickInput};
    use sparkler_night::Settings;

    const DEFAULT_FRAMES: u64 = 1200;
    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[derive(Debug, Default)]
    pub struct Args {
        pub frames: Option<u64>,
        pub settings: Option<PathBuf>,
        pub ar: bool,
    }

    impl Args {
        pub fn parse() -> Self {
            let mut args = Args::default();
            let mut iter = std::env::args().skip(1);
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--ar" => args.ar = true,
                    "--settings" => args.settings = iter.next().map(PathBuf::from),
                    other => match other.parse() {
                        Ok(n) => args.frames = Some(n),
                        Err(_) => log::warn!("Ignoring argument {other:?}"),
                    },
                }
            }
            if args.settings.is_none() {
                args.settings = std::env::var_os("SPARKLER_SETTINGS").map(PathBuf::from);
            }
            args
        }
    }

    /// Frame driver holding the scene and its presentation state
    struct Driver {
        scene: Scene,
        settings: Settings,
        surface: MeshSurface,
        tracker: Option<ReplayTracker>,
        accumulator: f32,
        input: TickInput,
        frame: u64,
        ticks: u64,
        peak_sparks: usize,
        peak_vertices: usize,
        // FPS tracking
        started: Instant,
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Driver {
        fn new(settings: Settings) -> Self {
            Self {
                scene: Scene::new(VIEWPORT, &settings),
                surface: MeshSurface::new(VIEWPORT),
                settings,
                tracker: None,
                accumulator: 0.0,
                input: TickInput::default(),
                frame: 0,
                ticks: 0,
                peak_sparks: 0,
                peak_vertices: 0,
                started: Instant::now(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Camera stand-in: the hand sweeps across, holds a thumb up,
        /// opens, then leaves the frame for a while
        fn start_replay(&mut self) {
            let mut frames = Vec::new();
            for i in 0..240 {
                let t = i as f32 / 240.0;
                let palm = Vec2::new(0.2 + 0.6 * t, 0.55 + 0.1 * (t * 6.0).sin());
                let pose = match i {
                    20..=40 => Pose::ThumbUp,
                    180..=200 => Pose::OpenHand,
                    _ => Pose::Fist,
                };
                frames.push(Some(HandLandmarks::pose(palm, pose)));
            }
            frames.extend(std::iter::repeat_n(None, 90));

            let mut tracker = ReplayTracker::new(frames, self.scene.viewport);
            match self.scene.enable_ar(&mut tracker) {
                Ok(()) => self.tracker = Some(tracker),
                Err(err) => log::warn!("Falling back to pointer input: {err}"),
            }
        }

        /// Pointer input for frames without a tracker
        fn script_pointer(&mut self) {
            let t = self.frame as f32 * SIM_DT;
            let center = self.scene.viewport * Vec2::new(0.5, 0.55);
            let swing = Vec2::new((t * 0.9).sin() * 300.0, (t * 1.8).sin() * 120.0);
            self.input.target = Some(center + swing);

            match self.frame {
                30 => self.input.ignite = true,
                720 => self.input.drop = true,
                _ => {}
            }
            // Someone keeps clicking the first lamp
            if self.frame % 900 == 600 {
                if let Some(lamp) = self.scene.street.lamps.first() {
                    self.input.click = Some(lamp.head() - Vec2::new(0.0, 10.0));
                }
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Some(tracker) = &mut self.tracker {
                    tracker.pump();
                }
                let input = self.input.clone();
                for event in self.scene.tick(&input) {
                    log_event(self.ticks, event);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
                self.ticks += 1;

                // Clear one-shot inputs after processing
                self.input.click = None;
                self.input.ignite = false;
                self.input.drop = false;
            }
        }

        /// Wall-clock frame rate over the last 60 frames
        fn track_fps(&mut self) {
            let time = self.started.elapsed().as_secs_f64();
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            self.track_fps();
            self.surface.begin_frame();
            draw_scene(&self.scene, &self.settings, &mut self.surface);
            if self.settings.show_fps {
                draw_fps(self.fps, &mut self.surface);
            }

            let sparks = self.scene.sparkler.emitter().pool().active_count();
            self.peak_sparks = self.peak_sparks.max(sparks);
            self.peak_vertices = self.peak_vertices.max(self.surface.vertex_count());

            if self.frame % 120 == 0 {
                log::debug!(
                    "frame {} ({} fps): {} sparks, {} batches, {} vertices, prompt {:?}",
                    self.frame,
                    self.fps,
                    sparks,
                    self.surface.batches().len(),
                    self.surface.vertex_count(),
                    self.scene.prompt().map(|p| p.text()),
                );
            }
        }

        fn shutdown(&mut self) {
            if let Some(mut tracker) = self.tracker.take() {
                self.scene.disable_ar(&mut tracker);
            }
        }
    }

    fn log_event(tick: u64, event: &SceneEvent) {
        match event {
            SceneEvent::LampLit(i) => log::info!("[{tick}] lamp {i} lit"),
            SceneEvent::LampExtinguished(i) => log::info!("[{tick}] lamp {i} put out"),
            other => log::info!("[{tick}] {other:?}"),
        }
    }

    pub fn run(args: Args) {
        let settings = Settings::load_or_default(args.settings.as_deref());
        log::info!(
            "Quality {}, pool capacity {}",
            settings.quality.as_str(),
            settings.tuning().emitter.capacity
        );

        let mut driver = Driver::new(settings);
        if args.ar {
            driver.start_replay();
        }

        let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
        for frame in 0..frames {
            driver.frame = frame;
            if driver.tracker.is_none() {
                driver.script_pointer();
            }
            // Halfway through the window gets rotated
            if frame == frames / 2 {
                driver.scene.resize(VIEWPORT.y, VIEWPORT.x);
                driver.surface.resize(driver.scene.viewport);
            }
            driver.update(SIM_DT);
            driver.render();
        }
        driver.shutdown();

        log::info!(
            "Ran {} frames ({} ticks): peak {} sparks, peak {} vertices, {}/{} lamps lit",
            frames,
            driver.ticks,
            driver.peak_sparks,
            driver.peak_vertices,
            driver.scene.street.lamps.iter().filter(|l| l.lit).count(),
            driver.scene.street.lamps.len(),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sparkler Night (headless) starting...");
    native::run(native::Args::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page embeds the library directly; nothing to run here
}
