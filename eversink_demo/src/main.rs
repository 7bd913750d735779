//! Lit cubes demo application
//!
//! A field of cubes in assorted PBR materials, lit by a sun, a lamp above the
//! scene and a flashlight held by the camera. Opaque cubes draw first, glassy
//! ones are blended on top.
//!
//! Controls: WASD move, mouse look, scroll zoom, T toggles textures,
//! F toggles the flashlight, Escape quits.

use std::rc::Rc;
use std::time::Instant;

use eversink_engine::core::config::DEFAULT_CONFIG_PATH;
use eversink_engine::foundation::logging;
use eversink_engine::prelude::*;
use eversink_engine::render::material::PBR_PRESETS;

// Scattered positions for the cube field
const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

struct LitCubesDemo {
    // Field order is drop order: GPU objects go before the context's window
    app: AppState,
    registry: AssetRegistry,
    backend: Rc<dyn RenderBackend>,
    sampler: InputSampler,
    timer: FrameTimer,
    frame_cap_fps: Option<u32>,
    window: Window,
}

impl LitCubesDemo {
    fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        log::info!("Creating window...");
        let mut window = Window::new(&config.window)?;
        let backend: Rc<dyn RenderBackend> = Rc::new(GlBackend::new(window.load_gl()?));
        let (width, height) = window.framebuffer_size();
        backend.set_viewport(width as i32, height as i32);

        let mut registry = AssetRegistry::new();
        let program = registry.add_program(ShaderProgram::from_files(
            backend.clone(),
            &config.shaders.vertex_path,
            &config.shaders.fragment_path,
        ));
        let mut textures = Vec::with_capacity(config.textures.paths.len());
        for path in &config.textures.paths {
            let texture = Texture::from_file(backend.clone(), path, SamplerParams::default())?;
            textures.push(registry.add_texture(texture));
        }

        let mut scene = Scene::new();
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let (name, material) = PBR_PRESETS[i * 2 % PBR_PRESETS.len()];
            log::debug!("Cube {} uses {}", i, name);
            let cube = Cube::new(
                backend.clone(),
                Vec3::from(*position),
                Vec3::repeat(1.0),
                [1.0, 1.0, 1.0],
                program,
            )?
            .with_textures(textures.clone())
            .with_material(material);
            scene.add_cube(cube);
        }
        log::info!(
            "Scene has {} cubes, {} transparent",
            scene.cubes.len(),
            scene.transparent_count()
        );

        scene.lighting.add_light(Light::default_directional());
        scene.lighting.add_light(Light::default_point(Vec3::new(0.0, 7.0, 5.0)));

        let camera = Camera::from_config(&config.camera, window.aspect_ratio());
        let flashlight = scene
            .lighting
            .add_light(Light::default_spot(camera.position, camera.front()));

        let mut app = AppState::new(camera, scene).with_clear_color(config.window.clear_color);
        if let Some(index) = flashlight {
            app = app.with_flashlight(index);
        }

        Ok(Self {
            app,
            registry,
            backend,
            sampler: InputSampler::new(),
            timer: FrameTimer::new(),
            frame_cap_fps: config.window.frame_cap_fps,
            window,
        })
    }

    fn run(&mut self) {
        log::info!("Entering frame loop");
        while self.app.running && !self.window.should_close() {
            let delta_time = self.timer.tick();

            let snapshot = self.window.sample();
            if let Some((width, height)) = self.window.take_resize() {
                self.app.resize(self.backend.as_ref(), width, height);
            }
            let input = self.sampler.sample(&snapshot);
            self.app.handle_input(&input, delta_time);
            self.app.update();

            self.app.render(self.backend.as_ref(), &self.registry);
            self.window.swap_buffers();

            if let Some(wait) = self
                .frame_cap_fps
                .and_then(|fps| self.timer.cap_remaining(fps, Instant::now()))
            {
                std::thread::sleep(wait);
            }
        }
        self.window.set_should_close(true);
        log::info!(
            "Rendered {} frames in {:.1}s",
            self.timer.frame_count(),
            self.timer.total_time()
        );
    }
}

fn main() {
    logging::init();
    log::info!("Starting Eversink lit cubes demo");

    let config = EngineConfig::load_or_default(DEFAULT_CONFIG_PATH);

    match LitCubesDemo::new(&config) {
        Ok(mut demo) => {
            demo.run();
            log::info!("Demo finished");
        }
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
