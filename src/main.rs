use std::process::ExitCode;

use nalgebra::{UnitQuaternion, Vector3};
use tracing_subscriber::EnvFilter;

use inertial_export::io::CsvTable;
use inertial_export::{
    replay, BodyRates, ExportConfigBuilder, ExtensionInfo, FlightEventKind, FlightSnapshot,
    GeodeticPosition, InertialExport,
};

const G0: f64 = 9.80665;
const EARTH_RADIUS: f64 = 6_371_000.0;

// Spaceport America
const LAUNCH_LAT_DEG: f64 = 32.990;
const LAUNCH_LON_DEG: f64 = -106.975;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let output_dir = std::env::args().nth(1).unwrap_or_else(|| ".".into());
    let config = ExportConfigBuilder::new()
        .output_dir(output_dir)
        .log_events(true)
        .build();

    // -----------------------------------------------------------------------
    // Fly a synthetic sounding rocket and feed every step to the exporter
    // -----------------------------------------------------------------------
    let (flight, events) = fly(0.05);
    let Some(last) = flight.last() else {
        return ExitCode::FAILURE;
    };

    let mut export = InertialExport::new(config);
    replay(&mut export, &flight, &events);
    let Some(summary) = export.last_summary().cloned() else {
        eprintln!("export failed: no CSV file was written");
        return ExitCode::FAILURE;
    };

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let info = ExtensionInfo::INERTIAL_EXPORT;
    println!();
    println!("====================================================================");
    println!("  {} ({})", info.name, info.category);
    println!("====================================================================");
    println!();
    println!("  File:          {}", summary.path.display());
    println!("  Rows:          {}", summary.rows);
    println!("  Complete:      {}", summary.complete);
    println!();

    match CsvTable::read_file(&summary.path) {
        Ok(table) => {
            let apogee = table
                .column("relPosZ")
                .map(|z| z.into_iter().fold(f64::MIN, f64::max))
                .unwrap_or(f64::NAN);
            println!("  Columns:       {}", table.header.len());
            println!("  Apogee:        {:>8.0} m", apogee);
            println!("  Flight time:   {:>8.1} s", last.time);
            println!();
            println!("  Events");
            println!("  ──────────────────────────────────────────────────────────────────");
            for c in &table.comments {
                println!("  {c}");
            }
        }
        Err(e) => eprintln!("  could not read back {}: {e}", summary.path.display()),
    }
    println!("====================================================================");
    println!();

    ExitCode::SUCCESS
}

/// Point-mass vertical-ish flight: constant thrust for a few seconds, then
/// ballistic coast to the ground. Returns the snapshots and the step index
/// of each flight event.
fn fly(dt: f64) -> (Vec<FlightSnapshot>, Vec<(usize, FlightEventKind)>) {
    let burn_time = 4.0;
    let thrust_accel = 60.0; // m/s^2
    let tilt = 0.05_f64;    // rad from vertical, toward East
    let thrust_dir = Vector3::new(tilt.sin(), 0.0, tilt.cos());
    let gravity = Vector3::new(0.0, 0.0, -G0);

    let mut pos = Vector3::zeros();
    let mut vel = Vector3::zeros();
    let mut quat = UnitQuaternion::rotation_between(&Vector3::z(), &thrust_dir)
        .unwrap_or_else(UnitQuaternion::identity);
    let mut prev_quat = quat;
    let mut t = 0.0;

    let mut snapshots = vec![snapshot(t, pos, vel, quat, None, None)];
    let mut events = vec![(0, FlightEventKind::Launch)];
    let mut burned_out = false;
    let mut past_apogee = false;

    loop {
        let burning = t < burn_time;
        let accel = if burning { gravity + thrust_dir * thrust_accel } else { gravity };

        vel += accel * dt;
        pos += vel * dt;
        t += dt;

        if vel.norm() > 1.0 {
            if let Some(q) = UnitQuaternion::rotation_between(&Vector3::z(), &vel) {
                quat = q;
            }
        }
        let rates = (prev_quat.inverse() * quat).scaled_axis() / dt;
        prev_quat = quat;

        let body_accel = quat.inverse() * (accel - gravity);
        snapshots.push(snapshot(
            t,
            pos,
            vel,
            quat,
            Some((accel, body_accel)),
            Some(BodyRates { yaw: rates.x, pitch: rates.y, roll: rates.z }),
        ));
        let idx = snapshots.len() - 1;

        if !burning && !burned_out {
            burned_out = true;
            events.push((idx, FlightEventKind::Burnout { stage: 0 }));
        }
        if !past_apogee && vel.z <= 0.0 && pos.z > 0.0 {
            past_apogee = true;
            events.push((idx, FlightEventKind::Apogee));
        }
        if pos.z <= 0.0 {
            events.push((idx, FlightEventKind::GroundHit));
            break;
        }
    }

    (snapshots, events)
}

fn snapshot(
    t: f64,
    pos: Vector3<f64>,
    vel: Vector3<f64>,
    quat: UnitQuaternion<f64>,
    accel: Option<(Vector3<f64>, Vector3<f64>)>,
    rates: Option<BodyRates>,
) -> FlightSnapshot {
    // Small-offset ENU → geodetic
    let lat = LAUNCH_LAT_DEG + (pos.y / EARTH_RADIUS).to_degrees();
    let lon = LAUNCH_LON_DEG
        + (pos.x / (EARTH_RADIUS * LAUNCH_LAT_DEG.to_radians().cos())).to_degrees();

    FlightSnapshot {
        time: t,
        pos,
        geodetic: GeodeticPosition { latitude_deg: lat, longitude_deg: lon },
        vel,
        world_accel: accel.map(|(w, _)| w),
        body_accel: accel.map(|(_, b)| b),
        quat,
        rates,
    }
}
