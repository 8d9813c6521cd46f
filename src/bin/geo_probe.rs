//! geo_probe - inspect globe projections from the command line
//!
//! Prints JSON for:
//! - `to-geo`: normalized screen point -> latitude/longitude on the configured globe
//! - `to-point`: latitude/longitude -> 3D point on a sphere
//! - `distance`: great-circle distance between two locations

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use globe_gestures::{geo_to_point3d, screen_to_geo, screen_to_geo_or, GameConfig, GeoPoint};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (TOML) for the globe camera. Defaults to GLOBE_CONFIG when set.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a normalized screen point (0..1, top-left origin) onto the globe.
    #[command(allow_negative_numbers = true)]
    ToGeo {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        /// Globe rotation about the vertical axis, in radians.
        #[arg(long, default_value_t = 0.0)]
        spin: f64,
        /// Report (0, 0) instead of an error when the ray misses the globe.
        #[arg(long)]
        fallback: bool,
    },
    /// Convert latitude/longitude to a point on a sphere.
    #[command(allow_negative_numbers = true)]
    ToPoint {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        /// Sphere radius; defaults to the configured globe radius.
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Great-circle distance in kilometres.
    #[command(allow_negative_numbers = true)]
    Distance {
        #[arg(long)]
        from_lat: f64,
        #[arg(long)]
        from_lng: f64,
        #[arg(long)]
        to_lat: f64,
        #[arg(long)]
        to_lng: f64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::load()?,
    };

    let output = match args.command {
        Command::ToGeo {
            x,
            y,
            spin,
            fallback,
        } => {
            let mut scene = cfg.globe.scene()?;
            scene.set_spin(spin);
            let geo = if fallback {
                screen_to_geo_or(&scene, x, y, GeoPoint::ORIGIN)
            } else {
                screen_to_geo(&scene, x, y)
            }
            .map_err(|e| anyhow!("to-geo: {}", e))?;
            json!({ "x": x, "y": y, "lat": geo.lat, "lng": geo.lng })
        }
        Command::ToPoint { lat, lng, radius } => {
            let radius = radius.unwrap_or(cfg.globe.radius);
            if !(radius.is_finite() && radius > 0.0) {
                return Err(anyhow!("radius must be a positive number"));
            }
            let point = geo_to_point3d(lat, lng, radius);
            json!({ "lat": lat, "lng": lng, "radius": radius, "point": point })
        }
        Command::Distance {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
        } => {
            let from = GeoPoint::new(from_lat, from_lng);
            let to = GeoPoint::new(to_lat, to_lng);
            json!({ "from": from, "to": to, "km": from.distance_km(&to) })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
