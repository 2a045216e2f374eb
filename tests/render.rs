use std::f64::consts::PI;
use std::fs;

use whitted_tracer::camera::Camera;
use whitted_tracer::color::Color;
use whitted_tracer::consts::MAX_RECURSION_DEPTH;
use whitted_tracer::matrix::Matrix4D;
use whitted_tracer::parallel;
use whitted_tracer::scene::Scene;
use whitted_tracer::tuple::Tuple4D;
use whitted_tracer::world::World;
use whitted_tracer::Error;

const GLASS_SCENE: &str = r#"{
    "camera": { "width": 32, "height": 24, "field_of_view": 1.047,
                "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0] },
    "light": { "at": [-10, 10, -10], "intensity": [1, 1, 1] },
    "materials": {
        "glass": { "transparency": 0.9, "reflective": 0.1,
                   "refractive_index": 1.5, "diffuse": 0.1, "ambient": 0.0 }
    },
    "objects": [
        { "type": "plane", "material": { "reflective": 0.3, "pattern":
            { "type": "checkers", "colors": [[1, 1, 1], [0.1, 0.1, 0.1]] } } },
        { "type": "sphere", "material": "glass",
          "transform": [["translate", 0, 1, 0]] },
        { "type": "sphere", "material": { "color": [0.9, 0.2, 0.2] },
          "transform": [["scale", 0.5, 0.5, 0.5], ["translate", 1.5, 0.5, 2]] }
    ]
}"#;

#[test]
fn demo_scene_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/refraction.json");
    let scene = Scene::load(path).unwrap();

    assert_eq!(scene.world.objects.len(), 10);
    assert_eq!(scene.camera.hsize, 400);
    assert_eq!(scene.camera.vsize, 400);
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let result = Scene::load("/nonexistent/scene.json");

    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn render_is_independent_of_worker_count() {
    let scene: Scene = GLASS_SCENE.parse().unwrap();

    let sequential = scene.camera.render(&scene.world, MAX_RECURSION_DEPTH);
    for workers in [1, 2, 5, 8].iter() {
        let canvas = parallel::render(&scene.world, &scene.camera, *workers,
            MAX_RECURSION_DEPTH, None);

        assert_eq!(canvas, sequential, "{} workers", workers);
    }
}

#[test]
fn default_world_center_pixel() {
    let world = World::new();
    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();
    let camera = Camera::new(11, 11, PI / 2.0, view).unwrap();

    let canvas = parallel::render(&world, &camera, 4, MAX_RECURSION_DEPTH, None);

    assert_eq!(canvas.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn rendered_scene_saves_as_ppm() {
    let scene: Scene = GLASS_SCENE.parse().unwrap();
    let canvas = parallel::render(&scene.world, &scene.camera, 3,
        MAX_RECURSION_DEPTH, None);

    let path = std::env::temp_dir()
        .join(format!("whitted-tracer-{}.ppm", std::process::id()));
    canvas.save(&path).unwrap();

    let ppm = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    let mut lines = ppm.lines();
    assert_eq!(lines.next(), Some("P3"));
    assert_eq!(lines.next(), Some("32 24"));
    assert_eq!(lines.next(), Some("255"));

    let components: Vec<u32> = lines
        .flat_map(|l| l.split_whitespace())
        .map(|c| c.parse().unwrap())
        .collect();

    assert_eq!(components.len(), 32 * 24 * 3);
    assert!(components.iter().all(|c| *c <= 255));
    assert!(ppm.lines().all(|l| l.len() <= 70));
}

#[test]
fn rendered_scene_saves_as_png() {
    let scene: Scene = GLASS_SCENE.parse().unwrap();
    let canvas = parallel::render(&scene.world, &scene.camera, 2,
        MAX_RECURSION_DEPTH, None);

    let path = std::env::temp_dir()
        .join(format!("whitted-tracer-{}.png", std::process::id()));
    canvas.save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert_eq!(image::load_from_memory(&bytes).unwrap().to_rgb8(), canvas.to_image());
}
