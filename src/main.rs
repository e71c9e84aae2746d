//! Pixel Arcade entry point
//!
//! Headless demos: each renders into a locked pixel buffer, downsamples it
//! to a glyph canvas and prints it to the terminal.
//!
//! ```text
//! pixel-arcade wireframe [MESH.obj] [--settings FILE] [--frames N]
//! pixel-arcade platformer [--settings FILE] [--frames N]
//! pixel-arcade breakout [--seed N] [--settings FILE] [--frames N]
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use glam::{Mat3, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pixel_arcade::consts::*;
use pixel_arcade::math::Vector2;
use pixel_arcade::platform::{FpsCounter, FrameLimiter, InputState, Key, KeyEvent, SystemClock, Timer};
use pixel_arcade::renderer::{Color, GlyphCanvas, Mesh, PixelBuffer, draw_line, fill_triangle, render_mesh_with};
use pixel_arcade::settings::Settings;
use pixel_arcade::sim::{
    AxisAlignedRect, BallOutcome, MovingActor, Paddle, Tile, TileCoord, TileGrid, step_ball, step_platformer,
};

/// Unit cube, used when no mesh file is given
const CUBE_OBJ: &str = "\
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
f 1 2 3
f 1 3 4
f 5 7 6
f 5 8 7
f 1 5 6
f 1 6 2
f 4 3 7
f 4 7 8
f 1 4 8
f 1 8 5
f 2 6 7
f 2 7 3
";

const PLATFORMER_LEVEL: [&str; 15] = [
    "....................",
    "....................",
    "....................",
    "....................",
    "....................",
    "....................",
    "....................",
    "...........###......",
    "....................",
    "......###...........",
    "....................",
    "..................#.",
    "..........#.......#.",
    "####################",
    "####################",
];

const BREAKOUT_LEVEL: [&str; 6] = [
    "....................",
    "....................",
    ".BBBBBBBBBBBBBBBBBB.",
    ".BBBBBBBBBBBBBBBBBB.",
    ".BBBBBBBBBBBBBBBBBB.",
    ".BBBBBBBBBBBBBBBBBB.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Wireframe,
    Platformer,
    Breakout,
}

#[derive(Debug)]
struct Options {
    mode: Mode,
    mesh: Option<PathBuf>,
    settings: Option<PathBuf>,
    frames: u32,
    seed: u64,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mode = match args.next().as_deref() {
        Some("wireframe") => Mode::Wireframe,
        Some("platformer") => Mode::Platformer,
        Some("breakout") => Mode::Breakout,
        Some(other) => bail!("unknown mode '{}' (expected wireframe, platformer or breakout)", other),
        None => bail!("usage: pixel-arcade <wireframe|platformer|breakout> [options]"),
    };
    let mut options = Options {
        mode,
        mesh: None,
        settings: None,
        frames: 600,
        seed: 0x5EED,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                options.settings = Some(args.next().context("--settings needs a path")?.into());
            }
            "--frames" => {
                let value = args.next().context("--frames needs a count")?;
                options.frames = value.parse().with_context(|| format!("bad frame count '{}'", value))?;
            }
            "--seed" => {
                let value = args.next().context("--seed needs a number")?;
                options.seed = value.parse().with_context(|| format!("bad seed '{}'", value))?;
            }
            path if options.mode == Mode::Wireframe && options.mesh.is_none() => {
                options.mesh = Some(path.into());
            }
            other => bail!("unexpected argument '{}'", other),
        }
    }
    Ok(options)
}

/// One runnable game
trait Demo {
    /// Advance one fixed timestep
    fn tick(&mut self, dt: f32);
    /// Draw into a locked buffer
    fn draw(&self, buffer: &mut PixelBuffer);
    fn finished(&self) -> bool;
}

/// Fixed-timestep loop: accumulate frame time, run up to `MAX_SUBSTEPS`
/// ticks, draw, present, then sleep out the frame
fn run<D: Demo>(demo: &mut D, settings: &Settings, frames: u32) -> Result<()> {
    let display = &settings.display;
    let clock = SystemClock::new();
    let mut limiter = FrameLimiter::new(clock, display.target_fps);
    let mut frame_timer = Timer::new(clock);
    let mut fps = FpsCounter::new();
    let mut buffer = PixelBuffer::new(display.width as usize, display.height as usize);
    let mut canvas = GlyphCanvas::new(display.columns, display.rows);
    let stdout = std::io::stdout();

    let mut accumulator = 0.0;
    frame_timer.start();
    let mut last_ticks = frame_timer.ticks();

    for frame in 0..frames {
        limiter.begin_frame();

        let now = frame_timer.ticks();
        let dt = ((now - last_ticks) as f32 / 1000.0).min(0.1);
        last_ticks = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            demo.tick(SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        buffer
            .with_lock(|b| {
                b.clear(Color::BLACK);
                demo.draw(b);
            })
            .context("pixel buffer was already locked")?;
        canvas.blit_from(&buffer, Color::BLACK);

        let mut out = stdout.lock();
        write!(out, "\x1b[H\x1b[2J{}", canvas.render())?;
        out.flush()?;

        fps.record(frame_timer.ticks());
        if display.show_fps && frame % 60 == 59 {
            log::info!("{:.1} fps", fps.fps());
        }
        if demo.finished() {
            log::info!("Demo finished after {} frames", frame + 1);
            break;
        }
        limiter.end_frame();
    }
    Ok(())
}

fn fill_rect(buffer: &mut PixelBuffer, rect: &AxisAlignedRect<f32>, color: Color) {
    if rect.is_empty() {
        return;
    }
    let (l, t) = (rect.left() as i32, rect.top() as i32);
    let (r, b) = (rect.right() as i32 - 1, rect.bottom() as i32 - 1);
    fill_triangle(buffer, (l, t), (r, t), (r, b), color);
    fill_triangle(buffer, (l, t), (r, b), (l, b), color);
}

fn outline_rect(buffer: &mut PixelBuffer, rect: &AxisAlignedRect<f32>, color: Color) {
    let (l, t) = (rect.left() as i32, rect.top() as i32);
    let (r, b) = (rect.right() as i32 - 1, rect.bottom() as i32 - 1);
    draw_line(buffer, l, t, r, t, color);
    draw_line(buffer, r, t, r, b, color);
    draw_line(buffer, r, b, l, b, color);
    draw_line(buffer, l, b, l, t, color);
}

fn draw_grid(buffer: &mut PixelBuffer, grid: &TileGrid) {
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let coord = TileCoord::new(x, y);
            let color = match grid.get(coord) {
                Tile::Empty => continue,
                Tile::Solid => Color::rgb(120, 120, 120),
                Tile::Brick => Color::rgb(200, 80, 40),
            };
            fill_rect(buffer, &grid.tile_rect(coord), color);
        }
    }
}

// === Wireframe viewer ===

struct WireframeDemo {
    mesh: Mesh,
    angle: f32,
    settings: Settings,
}

impl Demo for WireframeDemo {
    fn tick(&mut self, dt: f32) {
        self.angle = (self.angle + dt) % std::f32::consts::TAU;
    }

    fn draw(&self, buffer: &mut PixelBuffer) {
        // Model space is y-up, screen space is y-down
        let model = Mat3::from_diagonal(Vec3::new(0.8, -0.8, 0.8))
            * Mat3::from_rotation_x(0.4)
            * Mat3::from_rotation_y(self.angle);
        render_mesh_with(
            &self.mesh.transformed(model),
            buffer,
            Color::GREEN,
            self.settings.display.render_mode,
        );
    }

    fn finished(&self) -> bool {
        false
    }
}

// === Platformer ===

struct PlatformerDemo {
    grid: TileGrid,
    hero: MovingActor,
    input: InputState,
    script: Vec<(u32, KeyEvent)>,
    tick_count: u32,
    settings: Settings,
}

impl PlatformerDemo {
    fn new(settings: Settings) -> Self {
        let grid = TileGrid::from_rows(&PLATFORMER_LEVEL, TILE_SIZE);
        let floor = (13 * TILE_SIZE) as f32;
        let hero = MovingActor::new(
            Vector2::new(40.0, floor - HERO_HEIGHT),
            Vector2::new(HERO_WIDTH, HERO_HEIGHT),
        );
        // Scripted keyboard: run right, hop the platforms, come back
        let script = "d@0 w@40 w@95 w@150 ^d@200 a@210 w@260 ^a@330 q@400";
        Self {
            grid,
            hero,
            input: InputState::default(),
            script: parse_script(script),
            tick_count: 0,
            settings,
        }
    }
}

/// `key@tick` presses, `^key@tick` releases
fn parse_script(script: &str) -> Vec<(u32, KeyEvent)> {
    script
        .split_whitespace()
        .filter_map(|token| {
            let (key, tick) = token.split_once('@')?;
            let tick = tick.parse().ok()?;
            let (release, key) = match key.strip_prefix('^') {
                Some(k) => (true, k),
                None => (false, key),
            };
            let key = Key::from_char(key.chars().next()?)?;
            let event = if release { KeyEvent::Up(key) } else { KeyEvent::Down(key) };
            Some((tick, event))
        })
        .collect()
}

impl Demo for PlatformerDemo {
    fn tick(&mut self, dt: f32) {
        for &(_, event) in self.script.iter().filter(|(t, _)| *t == self.tick_count) {
            self.input.apply(event);
        }

        let report = step_platformer(
            &mut self.hero,
            &self.input.intent(),
            &self.grid,
            &self.settings.physics,
            self.grid.world_size().x,
            dt,
        );
        if report.jumped {
            log::debug!("Jump at tick {}", self.tick_count);
        }
        self.input.end_tick();
        self.tick_count += 1;
    }

    fn draw(&self, buffer: &mut PixelBuffer) {
        draw_grid(buffer, &self.grid);
        outline_rect(buffer, &self.hero.collider(), Color::WHITE);
    }

    fn finished(&self) -> bool {
        self.input.quit
    }
}

// === Breakout ===

struct BreakoutDemo {
    grid: TileGrid,
    ball: MovingActor,
    paddle: Paddle,
    rng: Pcg32,
    screen: Vector2<f32>,
    lives: u32,
    score: u32,
    settings: Settings,
}

impl BreakoutDemo {
    fn new(settings: Settings, seed: u64) -> Self {
        let screen = Vector2::new(settings.display.width as f32, settings.display.height as f32);
        let paddle = Paddle::new(
            (screen.x - PADDLE_WIDTH) / 2.0,
            screen.y - PADDLE_OFFSET,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        );
        let mut demo = Self {
            grid: TileGrid::from_rows(&BREAKOUT_LEVEL, TILE_SIZE),
            ball: MovingActor::new(Vector2::ZERO, Vector2::new(BALL_SIZE, BALL_SIZE)),
            paddle,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            lives: 3,
            score: 0,
            settings,
        };
        demo.serve();
        demo
    }

    /// Launch from just above the paddle at a random angle off vertical
    fn serve(&mut self) {
        let max_angle = match self.settings.ball.max_serve_angle.abs() {
            a if a.is_finite() => a,
            _ => 0.0,
        };
        let angle = self.rng.random_range(-max_angle..=max_angle);
        let speed = self.settings.ball.speed;
        self.ball.pos = Vector2::new(
            self.paddle.center_x() - BALL_SIZE / 2.0,
            self.paddle.rect.top() - BALL_SIZE - 1.0,
        );
        self.ball.vel = Vector2::new(angle.sin() * speed, -angle.cos() * speed);
        log::info!("Serve at {:.2} rad, {} lives left", angle, self.lives);
    }
}

impl Demo for BreakoutDemo {
    fn tick(&mut self, dt: f32) {
        let target = self.ball.center().x;
        self.paddle
            .move_toward(target, dt, self.settings.ball.paddle_speed, self.screen.x);

        let report = step_ball(&mut self.ball, &self.grid, &self.paddle, self.screen, dt);
        for &coord in &report.bricks_hit {
            if self.grid.clear(coord) == Tile::Brick {
                self.score += 1;
            }
        }
        if !report.bricks_hit.is_empty() {
            log::debug!("Score {}", self.score);
        }

        if report.outcome == BallOutcome::Lost {
            self.lives = self.lives.saturating_sub(1);
            log::info!("Ball lost, score {}", self.score);
            if self.lives > 0 {
                self.serve();
            }
        }
    }

    fn draw(&self, buffer: &mut PixelBuffer) {
        draw_grid(buffer, &self.grid);
        fill_rect(buffer, &self.paddle.collider(), Color::BLUE);
        fill_rect(buffer, &self.ball.collider(), Color::WHITE);
    }

    fn finished(&self) -> bool {
        self.lives == 0 || self.grid.count(Tile::Brick) == 0
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args(std::env::args().skip(1))?;
    let settings = match &options.settings {
        Some(path) => Settings::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    log::info!("Pixel Arcade starting {:?}", options.mode);

    match options.mode {
        Mode::Wireframe => {
            let mesh = match &options.mesh {
                Some(path) => Mesh::load(path).with_context(|| format!("loading mesh {}", path.display()))?,
                None => Mesh::parse(CUBE_OBJ),
            };
            let mut demo = WireframeDemo {
                mesh,
                angle: 0.0,
                settings: settings.clone(),
            };
            run(&mut demo, &settings, options.frames)
        }
        Mode::Platformer => {
            let mut demo = PlatformerDemo::new(settings.clone());
            run(&mut demo, &settings, options.frames)
        }
        Mode::Breakout => {
            let mut demo = BreakoutDemo::new(settings.clone(), options.seed);
            run(&mut demo, &settings, options.frames)
        }
    }
}
