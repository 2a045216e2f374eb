use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use indicatif::{ ProgressBar, ProgressStyle };
use log::{ error, info, warn };

use whitted_tracer::consts::{ DEFAULT_OUT_FILE, DEFAULT_WORKERS,
    MAX_RECURSION_DEPTH };
use whitted_tracer::parallel;
use whitted_tracer::scene::Scene;

/// Renders a JSON scene description to a PNG or PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the JSON scene description.
    scene: PathBuf,

    /// Where to write the rendered image; a `.png` extension writes PNG,
    /// anything else writes PPM.
    #[clap(short, long, default_value = DEFAULT_OUT_FILE)]
    output: PathBuf,

    /// Number of render threads (at least 1).
    #[clap(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Maximum number of reflection/refraction bounces per camera ray.
    #[clap(short, long, default_value_t = MAX_RECURSION_DEPTH)]
    depth: usize,

    /// Don't draw a progress bar.
    #[clap(long)]
    no_progress: bool,
}

/// Draws a progress bar from render completion fractions until the sender
/// hangs up.
fn spawn_progress_bar(rows: usize) -> (mpsc::Sender<f64>, thread::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel::<f64>();
    let bar = ProgressBar::new(rows as u64);

    match ProgressStyle::default_bar()
        .template("{bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise} | ETA: {eta}") {
        Ok(style) => bar.set_style(style),
        Err(e) => warn!("Falling back to the default progress style: {}", e),
    }

    let handle = thread::spawn(move || {
        for fraction in rx {
            bar.set_position((fraction * rows as f64).round() as u64);
        }

        bar.finish();
    });

    (tx, handle)
}

fn run(args: &Args) -> whitted_tracer::Result<()> {
    let scene = Scene::load(&args.scene)?;

    let (progress, bar) = if args.no_progress {
        (None, None)
    } else {
        let (tx, handle) = spawn_progress_bar(scene.camera.vsize);
        (Some(tx), Some(handle))
    };

    let canvas = parallel::render(&scene.world, &scene.camera,
        args.workers, args.depth, progress);

    // The renderer dropped its sender, so the bar thread is winding down.
    if let Some(handle) = bar {
        let _ = handle.join();
    }

    canvas.save(&args.output)?;
    info!("Saved render to {}.", args.output.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();

    if args.workers == 0 {
        error!("--workers must be at least 1");
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
