//! Renders a field of view on a generated map as a brightness ramp.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use rogrid::fov::Fov;
use rogrid::grid::{BitGridView, Distance, GridView, Point};
use rogrid::mapgen::{
    connect_areas_closest, find_components, place_rooms, PointSelector, RoomPlacementConfig,
    TunnelCarver,
};

const RAMP: &[u8] = b" .:-=+*%@";

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 424242)]
    seed: u64,
    #[arg(long, default_value_t = 40)]
    width: i32,
    #[arg(long, default_value_t = 20)]
    height: i32,
    #[arg(long, default_value_t = 8.0)]
    radius: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut map = BitGridView::new(args.width, args.height)?;
    place_rooms(&mut map, &RoomPlacementConfig::default(), &mut rng)?;
    let areas = find_components(&map, Distance::Manhattan);
    connect_areas_closest(
        &mut map,
        &areas,
        &PointSelector::Closest(Distance::Chebyshev),
        &TunnelCarver::LShaped,
        Distance::Chebyshev,
        &mut rng,
    )?;

    let center = map.bounds().center();
    let origin = map
        .set_positions()
        .min_by(|a, b| {
            Distance::Chebyshev
                .calculate(*a, center)
                .total_cmp(&Distance::Chebyshev.calculate(*b, center))
        })
        .unwrap_or(center);

    let mut fov = Fov::scalar(&map).unwrap();
    fov.calculate(origin, args.radius, Distance::Euclidean)?;

    for y in 0..map.height() {
        let mut row = String::new();
        for x in 0..map.width() {
            let pos = Point::new(x, y);
            let ch = if pos == origin {
                '@'
            } else if !map.get(pos)? {
                if fov.visibility_at(pos)? {
                    '#'
                } else {
                    ' '
                }
            } else {
                let bright = fov.brightness_at(pos)?;
                let index = (bright * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[index.min(RAMP.len() - 1)] as char
            };
            row.push(ch);
        }
        println!("{row}");
    }
    println!("origin ({}, {}) radius {}", origin.x, origin.y, args.radius);
    Ok(())
}
