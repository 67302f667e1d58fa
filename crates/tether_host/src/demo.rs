//! Demo content: a textured sprite scene, a title scene and a HUD script

use glam::{UVec2, Vec2, Vec3};
use tether_native::mirror::keys;
use tether_native::{KeyboardState, WindowState};
use tether_script::prelude::*;
use tether_script::StateHook;

const SPRITE_VERTEX: &str = "#version 330 core
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;
uniform mat4 u_mvp;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
";

const SPRITE_FRAGMENT: &str = "#version 330 core
in vec2 v_uv;
uniform sampler2D u_texture;
out vec4 color;
void main() {
    color = texture(u_texture, v_uv);
}
";

const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.5, 0.5, 0.0, //
    -0.5, 0.5, 0.0,
];
const QUAD_UVS: [f32; 8] = [0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Frames per sprite animation cell
const ANIMATION_STEP: u64 = 8;
const ATLAS_CELLS: u32 = 4;

pub fn register(runtime: &mut Runtime) -> Result<()> {
    runtime.register_scene("Title", || load_title)?;
    runtime.register_scene("Sprites", SpriteScene::default)?;
    if runtime.config().start_scene.is_none() {
        runtime.director_mut().set_start_scene("Title")?;
    }
    runtime.add_script(Hud::default());
    Ok(())
}

fn sprite_shader(ctx: &Context) -> Result<Shader> {
    let mut shader: Shader = ctx.assets().create("sprite_shader")?;
    shader.set_vertex_source(SPRITE_VERTEX);
    shader.set_fragment_source(SPRITE_FRAGMENT);
    shader.load()?;
    Ok(shader)
}

fn hud_font(ctx: &Context) -> Result<Text> {
    let mut font: Text = ctx.assets().create("hud_font")?;
    font.set_source("fonts/mono.ttf");
    font.load()?;
    font.set_shader(&sprite_shader(ctx)?)?;
    Ok(font)
}

fn load_title(scene: &Scene, ctx: &Context) -> Result<()> {
    let font = hud_font(ctx)?;
    let title = font.slot("title")?;
    title.set_content("tether - press enter")?;
    title.set_position(Vec2::new(32.0, 32.0))?;

    let camera = scene.new_camera()?;
    scene.set_active_camera(&camera)
}

/// Two sprites sharing one visual, stepping through a texture atlas
#[derive(Default)]
struct SpriteScene {
    sprites: Vec<GameObject>,
    music: Option<Audio>,
}

impl SceneBehavior for SpriteScene {
    fn load_assets(&mut self, scene: &Scene, ctx: &Context) -> Result<()> {
        let assets = ctx.assets();

        let quad: MeshBuffer = assets.create("quad")?;
        quad.set_vertices(&QUAD_VERTICES)?;
        quad.set_uvs(&QUAD_UVS)?;
        quad.set_indices(&QUAD_INDICES)?;

        let mut sheet: Texture = assets.create("sprite_sheet")?;
        sheet.set_source("textures/walk.png");
        sheet.load()?;

        let visual: Visual = assets.create("walker")?;
        visual.set_mesh(&quad)?;
        visual.set_shader(&sprite_shader(ctx)?)?;
        visual.set_texture(0, &sheet)?;
        visual.set_atlas_size(UVec2::new(ATLAS_CELLS, 1))?;

        for x in [-1.5f32, 1.5] {
            let sprite = scene.new_game_object()?;
            sprite.set_visual(&visual)?;
            sprite.set_position(Vec3::new(x, 0.0, 0.0))?;
            self.sprites.push(sprite);
        }

        let camera = scene.new_camera()?;
        camera.set_position(Vec3::new(0.0, 0.0, 5.0))?;
        scene.set_active_camera(&camera)?;

        let mut music: Audio = assets.create("theme")?;
        music.set_source("audio/theme.ogg");
        music.load()?;
        music.set_looping(true)?;
        music.set_volume(0.6)?;
        music.play()?;
        self.music = Some(music);

        scene.listener().set_volume(0.8)?;
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let cell = ((frame.number() / ANIMATION_STEP) % u64::from(ATLAS_CELLS)) as u32;
        for sprite in &self.sprites {
            sprite.set_atlas_offset(UVec2::new(cell, 0))?;
            let rotation = sprite.rotation()?;
            sprite.set_rotation(rotation + Vec3::new(0.0, 0.0, 0.02))?;
        }

        if frame.ctx().keyboard()?.is_down(keys::ESCAPE) {
            if let Some(music) = &self.music {
                music.stop()?;
            }
            frame.request_scene("Title");
        }
        Ok(())
    }
}

/// Frame counter overlay; also watches the window and the enter key
#[derive(Default)]
struct Hud {
    window: Option<StateHook<WindowState>>,
    keyboard: Option<StateHook<KeyboardState>>,
    last_window: Option<WindowState>,
    enter_down: bool,
}

impl Script for Hud {
    fn name(&self) -> &str {
        "hud"
    }

    fn init(&mut self, ctx: &Context) -> Result<()> {
        let window = ctx.state_hook::<WindowState>()?;
        self.last_window = Some(window.query()?);
        self.window = Some(window);
        self.keyboard = Some(ctx.state_hook::<KeyboardState>()?);
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        if let Some(window) = &self.window {
            let state = window.query()?;
            if let Some(last) = &self.last_window {
                if state.size_changed(last) {
                    log::info!("Window resized to {}x{}", state.width, state.height);
                }
            }
            self.last_window = Some(state);
        }

        let enter = match &self.keyboard {
            Some(keyboard) => keyboard.query()?.is_down(keys::ENTER),
            None => false,
        };
        if enter && !self.enter_down && frame.scene().name() == "Title" {
            frame.request_scene("Sprites");
        }
        self.enter_down = enter;

        if let Some(font) = frame.assets().get::<Text>("hud_font")? {
            let counter = font.slot("frame")?;
            counter.set_position(Vec2::new(8.0, 8.0))?;
            counter.set_content(&format!("frame {}", frame.number()))?;
        }
        Ok(())
    }
}
