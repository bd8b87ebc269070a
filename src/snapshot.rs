use nalgebra::{UnitQuaternion, Vector3};

// ---------------------------------------------------------------------------
// Host-side view of the simulation state
// ---------------------------------------------------------------------------

/// Geodetic position of the vehicle, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Body-frame angular rates, rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyRates {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Read-only view of the simulation state at one instant.
///
/// The host owns the data; exporters borrow it for the duration of a
/// single lifecycle call. Derived quantities are optional because a host
/// usually has no acceleration or rate sample before its first step.
pub trait SimulationSnapshot {
    /// Simulation time, s.
    fn time(&self) -> f64;

    /// Position relative to the launch site, m.
    fn position(&self) -> Vector3<f64>;

    fn geodetic(&self) -> GeodeticPosition;

    /// Velocity in the world frame, m/s.
    fn velocity(&self) -> Vector3<f64>;

    /// Acceleration in the world frame, m/s^2.
    fn world_acceleration(&self) -> Option<Vector3<f64>>;

    /// Acceleration in the body frame, m/s^2.
    fn body_acceleration(&self) -> Option<Vector3<f64>>;

    /// Body→world rotation.
    fn orientation(&self) -> UnitQuaternion<f64>;

    fn angular_rates(&self) -> Option<BodyRates>;
}

// ---------------------------------------------------------------------------
// Concrete snapshot
// ---------------------------------------------------------------------------

/// Plain-data snapshot, for hosts that already hold their state in
/// nalgebra types and for replaying recorded flights.
#[derive(Debug, Clone)]
pub struct FlightSnapshot {
    pub time: f64,                               // s
    pub pos: Vector3<f64>,                       // m, launch-relative
    pub geodetic: GeodeticPosition,              // deg
    pub vel: Vector3<f64>,                       // m/s, world frame
    pub world_accel: Option<Vector3<f64>>,       // m/s^2
    pub body_accel: Option<Vector3<f64>>,        // m/s^2
    pub quat: UnitQuaternion<f64>,               // body→world
    pub rates: Option<BodyRates>,                // rad/s
}

impl Default for FlightSnapshot {
    fn default() -> Self {
        Self {
            time: 0.0,
            pos: Vector3::zeros(),
            geodetic: GeodeticPosition::default(),
            vel: Vector3::zeros(),
            world_accel: None,
            body_accel: None,
            quat: UnitQuaternion::identity(),
            rates: None,
        }
    }
}

impl SimulationSnapshot for FlightSnapshot {
    fn time(&self) -> f64 {
        self.time
    }

    fn position(&self) -> Vector3<f64> {
        self.pos
    }

    fn geodetic(&self) -> GeodeticPosition {
        self.geodetic
    }

    fn velocity(&self) -> Vector3<f64> {
        self.vel
    }

    fn world_acceleration(&self) -> Option<Vector3<f64>> {
        self.world_accel
    }

    fn body_acceleration(&self) -> Option<Vector3<f64>> {
        self.body_accel
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.quat
    }

    fn angular_rates(&self) -> Option<BodyRates> {
        self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_has_no_derived_samples() {
        let s = FlightSnapshot::default();
        assert!(s.world_acceleration().is_none());
        assert!(s.body_acceleration().is_none());
        assert!(s.angular_rates().is_none());
        assert_eq!(s.orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn trait_view_matches_fields() {
        let s = FlightSnapshot {
            time: 2.5,
            pos: Vector3::new(1.0, 2.0, 300.0),
            vel: Vector3::new(0.0, 0.0, 120.0),
            ..FlightSnapshot::default()
        };
        let view: &dyn SimulationSnapshot = &s;
        assert_eq!(view.time(), 2.5);
        assert_eq!(view.position().z, 300.0);
        assert_eq!(view.velocity().z, 120.0);
    }
}
