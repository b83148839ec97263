use std::fs::File;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};
use vizbind::{
    Attr, BindingSet, Color, Event, NodeId, Scene, SceneError, ShapeKind, Surface, Terminal,
    TransitionConfig,
};

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;

#[derive(Debug, Clone)]
struct Dot {
    id: u32,
    x: f64,
    y: f64,
    r: f64,
}

/// Dots for `step`: a sliding window of ids, each orbiting the center.
fn dots(step: u32) -> Vec<Dot> {
    (step..step + 6)
        .map(|id| {
            let angle = (id as f64 * 0.9) + step as f64 * 0.3;
            Dot {
                id,
                x: WIDTH / 2.0 + angle.cos() * 120.0,
                y: HEIGHT / 2.0 + angle.sin() * 90.0,
                r: 8.0 + (id % 4) as f64 * 4.0,
            }
        })
        .collect()
}

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("join.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut scene = Scene::new();
    let container = scene
        .append(NodeId::ROOT, ShapeKind::Group)
        .map_err(std::io::Error::other)?;
    let mut set: BindingSet<u32> = BindingSet::new(container, ShapeKind::Circle);
    let transition = Some(TransitionConfig::millis(600));
    let mut term = Terminal::new()?;
    let mut step = 0;

    loop {
        let data = dots(step);
        let result: Result<_, SceneError> = set.refresh(
            &mut scene,
            &data,
            |_, d| d.id,
            |el, d| {
                el.set(Attr::Cx, d.x)?
                    .set(Attr::Cy, d.y)?
                    .set(Attr::Fill, Color::named("steelblue").unwrap_or(Color::BLACK))?
                    .set(Attr::R, 0.0)?
                    .animate(Attr::R, d.r)?;
                Ok(())
            },
            |el, d| {
                el.animate(Attr::Cx, d.x)?.animate(Attr::Cy, d.y)?;
                Ok(())
            },
            |el| {
                el.animate(Attr::R, 0.0)?;
                Ok(())
            },
            transition,
        );
        result.map_err(std::io::Error::other)?;

        // Animate until the next key press
        loop {
            scene.tick(Instant::now());
            term.render(&scene, (WIDTH, HEIGHT))?;

            let events = term.poll(Duration::from_millis(16))?;
            let mut advance = false;
            for event in events {
                if event.is_quit() {
                    return Ok(());
                }
                if matches!(event, Event::Key { .. }) {
                    advance = true;
                }
            }
            if advance {
                break;
            }
        }
        step += 1;
    }
}
