use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use copperline::output;
use copperline::space::{Bounds, Point};
use copperline::Scene;

const QUERY_BATCH: usize = 1000;

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let input = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: cli <pcb-file> [out.obj]");
            process::exit(1);
        }
    };
    let obj_path = args.next();

    let start = Instant::now();
    let scene = match Scene::load(&input) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("{}: {}", input, err);
            process::exit(1);
        }
    };
    info!(
        "indexed {} primitives from {} in {:?}",
        scene.primitives().len(),
        input,
        start.elapsed()
    );

    if scene.is_empty() {
        info!("nothing to query");
        return;
    }

    let bbox = *scene.bounding_box();
    info!(
        "scene bounds [{}, {}] x [{}, {}]",
        bbox.min.x, bbox.max.x, bbox.min.y, bbox.max.y
    );

    // Query batches need room to sample from
    let extent = bbox.diagonal();
    if extent.x > 0.0 && extent.y > 0.0 {
        run_closest_queries(&scene, &bbox);
        run_collision_queries(&scene, &bbox);
    }

    if let Some(path) = obj_path {
        let file = match File::create(&path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("{}: {}", path, err);
                process::exit(1);
            }
        };
        let mut out = BufWriter::new(file);
        if let Err(err) = output::write_scene(&mut out, &scene) {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
        info!("wrote visualization to {}", path);
    }
}

fn random_point(rng: &mut StdRng, bbox: &Bounds) -> Point {
    Point::new(
        rng.gen_range(bbox.min.x, bbox.max.x),
        rng.gen_range(bbox.min.y, bbox.max.y)
    )
}

fn run_closest_queries(scene: &Scene, bbox: &Bounds) {
    let mut rng = StdRng::seed_from_u64(0x70CB);
    let queries: Vec<Point> = (0..QUERY_BATCH)
        .map(|_| random_point(&mut rng, bbox))
        .collect();

    let start = Instant::now();
    for q in &queries {
        scene.closest_point(q).expect("closest-point query failed");
    }
    info!(
        "{} closest-point queries spent {:?}",
        queries.len(),
        start.elapsed()
    );
}

fn run_collision_queries(scene: &Scene, bbox: &Bounds) {
    let mut rng = StdRng::seed_from_u64(0xB0CB);
    let extent = bbox.diagonal();
    let queries: Vec<Bounds> = (0..QUERY_BATCH).map(|_| {
        let min = random_point(&mut rng, bbox);
        let width = rng.gen_range(0.1 * extent.x, 0.3 * extent.x);
        let height = rng.gen_range(0.1 * extent.y, 0.3 * extent.y);
        Bounds::new(min, Point::new(min.x + width, min.y + height))
    }).collect();

    let start = Instant::now();
    let mut total_hits = 0usize;
    for bbox in &queries {
        let (hits, _) = scene
            .collision_detection(bbox)
            .expect("collision query failed");
        total_hits += hits.len();
    }
    info!(
        "{} collision queries spent {:?} ({} hits)",
        queries.len(),
        start.elapsed(),
        total_hits
    );
}
