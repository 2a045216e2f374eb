use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use log::{ debug, info };

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::world::World;

/// Renders `world` through `camera` using `workers` threads.
///
/// Rows are dealt out round-robin: worker `i` shades rows `i`, `i + N`,
/// `i + 2N` and so on. Every worker owns its rows as disjoint mutable slices
/// of the canvas, so pixels are written without any locking, and the scope
/// join makes all writes visible before the canvas is returned. The output is
/// identical for any worker count.
///
/// If `progress` is given, the fraction of finished rows is sent on it after
/// each row completes. The fractions never decrease and the last one is
/// `1.0`. A dropped receiver is ignored; it never stalls the render.
pub fn render(world: &World, camera: &Camera, workers: usize, depth: usize,
    progress: Option<mpsc::Sender<f64>>) -> Canvas {
    let workers = workers.max(1);
    let total_rows = camera.vsize;
    let mut canvas = Canvas::new(camera.hsize, camera.vsize);

    info!("Rendering {}x{} using {} workers...",
        camera.hsize, camera.vsize, workers);
    let start = Instant::now();

    let mut partitions: Vec<Vec<(usize, &mut [Color])>> =
        (0..workers).map(|_| Vec::new()).collect();

    for (y, row) in canvas.rows_mut().enumerate() {
        partitions[y % workers].push((y, row));
    }

    let (done_tx, done_rx) = mpsc::channel::<usize>();

    thread::scope(|s| {
        for (id, partition) in partitions.into_iter().enumerate() {
            if partition.is_empty() {
                continue;
            }

            let done_tx = done_tx.clone();
            s.spawn(move || {
                debug!("Worker {} shading {} rows", id, partition.len());

                for (y, row) in partition {
                    camera.render_row(world, y, row, depth);
                    // The coordinator outlives every worker.
                    let _ = done_tx.send(y);
                }
            });
        }

        // Workers hold the only remaining senders, so the loop below ends
        // once the last of them finishes.
        drop(done_tx);

        let mut rows_done = 0;
        for _ in done_rx.iter() {
            rows_done += 1;

            if let Some(ref tx) = progress {
                let _ = tx.send(rows_done as f64 / total_rows as f64);
            }
        }
    });

    info!("...done in {:.2?}.", start.elapsed());

    canvas
}

/* Tests */

#[cfg(test)]
fn small_camera(hsize: usize, vsize: usize) -> Camera {
    use crate::matrix::Matrix4D;
    use crate::tuple::Tuple4D;

    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 1.5, -5.0),
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();

    Camera::new(hsize, vsize, std::f64::consts::PI / 3.0, view).unwrap()
}

#[test]
fn worker_count_does_not_change_output() {
    let w = World::new();
    let c = small_camera(24, 17);

    let one = render(&w, &c, 1, 5, None);
    let many = render(&w, &c, 8, 5, None);

    assert_eq!(one.pixels(), many.pixels());
}

#[test]
fn parallel_matches_sequential() {
    let w = World::new();
    let c = small_camera(16, 9);

    assert_eq!(render(&w, &c, 3, 5, None), c.render(&w, 5));
}

#[test]
fn more_workers_than_rows() {
    let w = World::new();
    let c = small_camera(5, 3);

    assert_eq!(render(&w, &c, 8, 5, None), c.render(&w, 5));
}

#[test]
fn zero_workers_still_renders() {
    let w = World::new();
    let c = small_camera(4, 4);

    assert_eq!(render(&w, &c, 0, 5, None), c.render(&w, 5));
}

#[test]
fn progress_is_monotonic_and_completes() {
    let w = World::new();
    let c = small_camera(8, 12);
    let (tx, rx) = mpsc::channel();

    render(&w, &c, 4, 5, Some(tx));

    let fractions: Vec<f64> = rx.iter().collect();

    assert_eq!(fractions.len(), 12);
    assert!(fractions.windows(2).all(|p| p[0] <= p[1]));
    assert_eq!(fractions.last().copied(), Some(1.0));
}

#[test]
fn dropped_progress_receiver_is_ignored() {
    let w = World::new();
    let c = small_camera(6, 6);
    let (tx, rx) = mpsc::channel();
    drop(rx);

    assert_eq!(render(&w, &c, 2, 5, Some(tx)), c.render(&w, 5));
}
