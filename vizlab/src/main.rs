use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use vizbind::{hit_test, render_to_buffer, Buffer, Event, Scene, Terminal, Viewport};
use vizlab::labs::{bars, BarsLab, BubblesLab, MapLab, ScatterLab};
use vizlab::{DataSource, Lab, LabConfig, LabError, LabKind};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "vizlab")]
#[command(about = "Animated data-binding chart labs in the terminal")]
struct Cli {
    /// Lab to open
    #[arg(value_enum)]
    lab: LabKind,

    /// Directory with points.json, gapminder.json and crime.json
    #[arg(long)]
    data: Option<PathBuf>,

    /// Transition duration in milliseconds (0 disables transitions)
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Apply every change immediately
    #[arg(long)]
    reduced_motion: bool,

    /// Log file
    #[arg(long, default_value = "vizlab.log")]
    log: PathBuf,

    /// Print one settled frame to stdout instead of opening the terminal UI
    #[arg(long)]
    snapshot: bool,

    /// Snapshot width in cells
    #[arg(long, default_value = "100")]
    cols: u16,

    /// Snapshot height in cells
    #[arg(long, default_value = "40")]
    rows: u16,

    /// Seed for generated points
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> LabConfig {
        let mut config = self.lab.default_config().reduced_motion(self.reduced_motion);
        if let Some(ms) = self.duration_ms {
            config = config.transition(Duration::from_millis(ms));
        }
        if let Some(dir) = &self.data {
            config = config.data_dir(dir);
        }
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        config
    }
}

fn main() -> Result<(), LabError> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log).map_err(|source| LabError::Io {
        path: cli.log.clone(),
        source,
    })?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let config = cli.config();
    let source = DataSource::from_dir(config.data_dir.clone());
    log::info!("[vizlab] starting {:?} with {:?}", cli.lab, source);

    let mut scene = Scene::new();
    scene.set_reduced_motion(config.reduced_motion || cli.snapshot);

    match cli.lab {
        LabKind::Bars => {
            let lab = BarsLab::mount(&mut scene, config, bars::fruits())?;
            run(&cli, scene, lab)
        }
        LabKind::Scatter => {
            let lab = ScatterLab::mount(&mut scene, config, source.points()?)?;
            run(&cli, scene, lab)
        }
        LabKind::Bubbles => {
            let lab = BubblesLab::mount(&mut scene, config, source.gapminder()?)?;
            run(&cli, scene, lab)
        }
        LabKind::Map => {
            let lab = MapLab::mount(&mut scene, config, source.crime()?)?;
            run(&cli, scene, lab)
        }
    }
}

fn run<L: Lab>(cli: &Cli, mut scene: Scene, mut lab: L) -> Result<(), LabError> {
    lab.render(&mut scene)?;

    if cli.snapshot {
        let config = lab.config();
        let viewport = Viewport::new(config.width, config.height, cli.cols, cli.rows);
        let mut buf = Buffer::new(cli.cols, cli.rows);
        render_to_buffer(&scene, &viewport, &mut buf);
        print!("{}", buf.to_text());
        return Ok(());
    }

    let mut terminal = Terminal::new()?;
    let size = (lab.config().width, lab.config().height);
    let mut redraw = true;

    loop {
        // Draw the frame a transition finishes on as well.
        let animating = scene.has_active_transitions();
        scene.tick(Instant::now());
        if redraw || animating {
            terminal.render(&scene, size)?;
            redraw = false;
        }

        for event in terminal.poll(FRAME)? {
            if event.is_quit() {
                return Ok(());
            }
            match event {
                Event::Key { key, .. } => {
                    if lab.handle_key(key) {
                        lab.render(&mut scene)?;
                        redraw = true;
                    }
                }
                Event::MouseMove { x, y } => {
                    let node = hit_test(&scene, &terminal.viewport(size), x, y);
                    if lab.handle_hover(node) {
                        lab.render(&mut scene)?;
                        redraw = true;
                    }
                }
                Event::Resize { .. } => redraw = true,
            }
        }
    }
}
