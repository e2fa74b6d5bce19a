use std::{path::PathBuf, rc::Rc, time::Instant};

use glam::{Vec3, Vec4};
use glint_core::{
    DirectionalLight, LightSource, Material,
    camera::OrbitCamera,
    config::ViewerConfig,
    image_data::TextureFlags,
    input::{InputState, MouseButton},
    material::{AMBIENT_UNIT, DIFFUSE_UNIT, SPECULAR_UNIT},
};
use glow::HasContext;
use sdl2::event::WindowEvent;

use crate::{
    abs::{App, ShaderProgram, Texture},
    model::Model,
};

mod abs;
mod input;
mod logging;
mod model;

macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!("render/shaders/", stringify!($name), "/vert.glsl")),
            include_str!(concat!("render/shaders/", stringify!($name), "/frag.glsl")),
        )
    };
}

/// Degrees the camera turns per pixel of mouse movement.
const MOUSE_SENSITIVITY: f32 = 0.3;
/// Degrees per second the model spins around its y axis.
const SPIN_SPEED: f32 = 45.0;
/// Units per second the arrow keys move the model.
const MOVE_SPEED: f32 = 1.5;

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glint").join("config.json"))
}

fn plain_material() -> Material {
    Material::new(
        Vec4::new(0.3, 0.3, 0.35, 1.0),
        Vec4::new(0.7, 0.7, 0.75, 1.0),
        Vec4::new(0.6, 0.6, 0.6, 1.0),
        32.0,
    )
}

/// Registers the textured material for the current state of `texture` and selects it, falling
/// back to the plain material while the texture is invalid.
fn refresh_materials(model: &mut Model, texture: &Texture) {
    let name = match texture.id() {
        Some(id) => {
            let material = Material {
                ambient: Vec4::ONE,
                diffuse: Vec4::ONE,
                ..plain_material()
            }
            .with_ambient_texture(id)
            .with_diffuse_texture(id);
            model.add_material("textured", material);
            "textured"
        }
        None => "plain",
    };
    match model.use_material(name) {
        Ok(()) => log::debug!(
            "Using material '{}' of {}",
            name,
            model.materials().len()
        ),
        Err(e) => log::warn!("{}", e),
    }
}

fn run(config: &ViewerConfig) -> Result<(), String> {
    let mut app = App::new(&config.window)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::CULL_FACE);
        app.gl.cull_face(glow::BACK);
        app.gl.front_face(glow::CCW);
    }

    let program = Rc::new(shader_program!(model, app.gl)?);
    program.use_program();
    program.set_uniform("u_ambient_tex", AMBIENT_UNIT as i32);
    program.set_uniform("u_diffuse_tex", DIFFUSE_UNIT as i32);
    program.set_uniform("u_specular_tex", SPECULAR_UNIT as i32);

    let mut model = Model::load(&app.gl, &config.model)?;
    model.use_program(Rc::clone(&program));
    model.add_material("plain", plain_material());
    log::info!(
        "Loaded {} ({} triangles)",
        config.model.display(),
        model.index_count() / 3
    );

    let mut texture = Texture::blank(&app.gl);
    if let Some(path) = &config.texture {
        // a missing texture is not fatal, the model is drawn untextured
        if texture
            .load(path, TextureFlags::default() | TextureFlags::TEXTURE_REPEATS)
            .is_ok()
        {
            log::info!(
                "Loaded texture {} ({}x{})",
                path.display(),
                texture.width(),
                texture.height()
            );
        }
    }
    refresh_materials(&mut model, &texture);
    let mut textured = texture.is_valid();

    let mut camera = OrbitCamera::default();
    let mut light = DirectionalLight::with_ambient_scale(
        config.light.color(),
        config.light.ambient_scale,
        config.light.direction(),
        camera.view_dir(),
    );

    let mut input = InputState::new();
    let (width, height) = app.size();
    let mut aspect_ratio = width as f32 / height.max(1) as f32;
    let mut paused = false;
    let mut spinning = true;
    let mut last_frame_time = Instant::now();

    loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        for win_event in input::poll(&mut app.event_pump, &mut input) {
            if let WindowEvent::Resized(width, height) = win_event {
                unsafe {
                    app.gl.viewport(0, 0, width, height);
                }
                aspect_ratio = width as f32 / height.max(1) as f32;
            }
        }

        if input.quit() || input.key_down("Escape") {
            break;
        }

        if input.key_pressed("p") {
            paused = !paused;
            // drop whatever was pressed together with the toggle
            input.clear();
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }

        if !paused {
            if input.mouse_down(MouseButton::Left)
                && let Some(motion) = input.motion()
            {
                camera.orbit(
                    -motion.xrel as f32 * MOUSE_SENSITIVITY,
                    motion.yrel as f32 * MOUSE_SENSITIVITY,
                );
                light.update_view_dir(camera.view_dir());
            }
            if input.key_down("w") {
                camera.zoom(-2.0 * delta_time);
            }
            if input.key_down("s") {
                camera.zoom(2.0 * delta_time);
            }
            if input.key_pressed("r") {
                spinning = !spinning;
            }
            if input.key_pressed("t") && texture.is_valid() {
                textured = !textured;
            }
            if input.key_pressed("l") {
                match texture.reload() {
                    Ok(()) => {
                        if let Some(file) = texture.file() {
                            log::info!("Reloaded texture {}", file.display());
                        }
                    }
                    Err(e) => log::warn!("Texture reload failed: {}", e),
                }
                refresh_materials(&mut model, &texture);
                textured &= texture.is_valid();
            }
            if input.key_down("Left") {
                model.translate(Vec3::new(-MOVE_SPEED * delta_time, 0.0, 0.0));
            }
            if input.key_down("Right") {
                model.translate(Vec3::new(MOVE_SPEED * delta_time, 0.0, 0.0));
            }
            if input.key_pressed("=") {
                model.scale(Vec3::splat(1.25));
            }
            if input.key_pressed("-") {
                model.scale(Vec3::splat(0.8));
            }
            if input.mouse_click(MouseButton::Right) {
                model.transform_mut().reset();
            }
            if spinning {
                model.rotate(SPIN_SPEED * delta_time, Vec3::Y);
            }
        }

        unsafe {
            app.gl.clear_color(0.08, 0.08, 0.1, 1.0);
            app.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        program.use_program();
        program.set_uniform("u_view", camera.view_matrix());
        program.set_uniform("u_projection", camera.projection_matrix(aspect_ratio));
        program.set_uniform_vec4_slice("u_light", &light.raw());
        model.draw(textured);

        app.window.gl_swap_window();
    }

    Ok(())
}

fn main() {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match ViewerConfig::load_or_default(
        explicit.as_deref(),
        default_config_path().as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(config.log_level()) {
        eprintln!("Failed to set up logging: {}", e);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
