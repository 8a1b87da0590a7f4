//! Interactive demo of the two electrostatics engines.
//!
//! `--model pp` scatters charged bodies over the window and lets them push
//! each other around; `R` scatters a fresh set. `--model pm` starts empty:
//! left click drops a positive charge, right click a negative one, and the
//! sampled field is drawn as short arrows; `R` clears it. Escape quits.

mod view;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rcoulomb::config::{Model, SimConfig};
use rcoulomb::{ParticleMesh, ParticleParticle};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;

/// Background color for the canvas
const BACKGROUND: Color = Color::BLACK;
/// Frames per second the loop aims for
const FPS: u32 = 60;

#[derive(Parser, Debug)]
#[command(name = "rcoulomb", about = "Particle-particle and particle-mesh electrostatics")]
struct Args {
    /// Scenario file, defaults apply when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    model: Option<Model>,

    #[arg(long)]
    capacity: Option<usize>,

    /// Seed for the pp scatter
    #[arg(long)]
    seed: Option<u64>,
}

enum Engine {
    Pp(ParticleParticle),
    Pm(ParticleMesh),
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_yaml_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.capacity.is_some() {
        config.capacity = args.capacity;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    info!("starting {:?} with capacity {}", config.model, config.capacity());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let domain = config.domain();
    let charge = config.constants.charge;

    let mut engine = match config.model {
        Model::ParticleParticle => {
            let mut pp = config.build_pp()?;
            pp.randomize(&mut rng, domain, charge);
            Engine::Pp(pp)
        }
        Model::ParticleMesh => Engine::Pm(config.build_pm()?),
    };

    let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
    let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
    let title = match config.model {
        Model::ParticleParticle => "Particle-Particle Model",
        Model::ParticleMesh => "Particle-Mesh Model",
    };
    let window = video_subsystem
        .window(title, config.window[0], config.window[1])
        .position_centered()
        .build()?;
    let mut canvas = window.into_canvas().build()?;
    let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

    let mut last_frame_time = Instant::now();

    'running: loop {
        for event in event_pump.poll_iter() {
            match (event, &mut engine) {
                (Event::Quit { .. }, _)
                | (Event::KeyDown { keycode: Some(Keycode::Escape), .. }, _) => break 'running,
                (Event::KeyDown { keycode: Some(Keycode::R), .. }, Engine::Pp(pp)) => {
                    pp.reset();
                    pp.randomize(&mut rng, domain, charge);
                }
                (Event::KeyDown { keycode: Some(Keycode::R), .. }, Engine::Pm(pm)) => pm.reset(),
                (Event::MouseButtonDown { mouse_btn, x, y, .. }, Engine::Pm(pm)) => {
                    let position = [x as f32, y as f32];
                    match mouse_btn {
                        MouseButton::Left => {
                            pm.add(position, charge);
                        }
                        MouseButton::Right => {
                            pm.add(position, -charge);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        match &mut engine {
            Engine::Pp(pp) => {
                pp.step(dt);
                view::draw_pp(pp, &mut canvas);
            }
            Engine::Pm(pm) => {
                pm.step(dt);
                view::draw_pm(pm, &mut canvas);
            }
        }
        canvas.present();

        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / FPS));
    }

    info!("bye");
    Ok(())
}
