use nalgebra::Vector3;

use crate::snapshot::SimulationSnapshot;

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// Extracts one exported quantity from a snapshot.
pub type Extractor = fn(&dyn SimulationSnapshot) -> f64;

/// A named column of the export.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub extract: Extractor,
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor").field("name", &self.name).finish()
    }
}

/// Component `i` of an optional host sample; NaN when the host has none.
fn component(v: Option<Vector3<f64>>, i: usize) -> f64 {
    v.map_or(f64::NAN, |v| v[i])
}

/// Exported columns, in file order.
///
/// Columns:  t, relPos{X,Y,Z}, lat, lon, worldVel{X,Y,Z}, worldAcc{X,Y,Z},
///           q{W,X,Y,Z}, bodyAcc{X,Y,Z}, bodyGyr{X,Y,Z}
pub static FIELDS: [FieldDescriptor; 22] = [
    FieldDescriptor { name: "t", extract: |s| s.time() },
    FieldDescriptor { name: "relPosX", extract: |s| s.position().x },
    FieldDescriptor { name: "relPosY", extract: |s| s.position().y },
    FieldDescriptor { name: "relPosZ", extract: |s| s.position().z },
    FieldDescriptor { name: "lat", extract: |s| s.geodetic().latitude_deg },
    FieldDescriptor { name: "lon", extract: |s| s.geodetic().longitude_deg },
    FieldDescriptor { name: "worldVelX", extract: |s| s.velocity().x },
    FieldDescriptor { name: "worldVelY", extract: |s| s.velocity().y },
    FieldDescriptor { name: "worldVelZ", extract: |s| s.velocity().z },
    FieldDescriptor { name: "worldAccX", extract: |s| component(s.world_acceleration(), 0) },
    FieldDescriptor { name: "worldAccY", extract: |s| component(s.world_acceleration(), 1) },
    FieldDescriptor { name: "worldAccZ", extract: |s| component(s.world_acceleration(), 2) },
    FieldDescriptor { name: "qW", extract: |s| s.orientation().quaternion().w },
    FieldDescriptor { name: "qX", extract: |s| s.orientation().quaternion().i },
    FieldDescriptor { name: "qY", extract: |s| s.orientation().quaternion().j },
    FieldDescriptor { name: "qZ", extract: |s| s.orientation().quaternion().k },
    FieldDescriptor { name: "bodyAccX", extract: |s| component(s.body_acceleration(), 0) },
    FieldDescriptor { name: "bodyAccY", extract: |s| component(s.body_acceleration(), 1) },
    FieldDescriptor { name: "bodyAccZ", extract: |s| component(s.body_acceleration(), 2) },
    // Gyro axes follow the host's yaw/pitch/roll rate channels.
    FieldDescriptor { name: "bodyGyrX", extract: |s| s.angular_rates().map_or(f64::NAN, |r| r.yaw) },
    FieldDescriptor { name: "bodyGyrY", extract: |s| s.angular_rates().map_or(f64::NAN, |r| r.pitch) },
    FieldDescriptor { name: "bodyGyrZ", extract: |s| s.angular_rates().map_or(f64::NAN, |r| r.roll) },
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered set of exported fields. The same catalog produces both the
/// header and every row of a file, so column counts always agree.
#[derive(Debug, Clone, Copy)]
pub struct FieldCatalog {
    fields: &'static [FieldDescriptor],
}

impl FieldCatalog {
    /// The inertial export columns.
    pub fn standard() -> Self {
        Self { fields: &FIELDS }
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Evaluate every extractor, in catalog order.
    pub fn values(&self, snapshot: &dyn SimulationSnapshot) -> Vec<f64> {
        self.fields.iter().map(|f| (f.extract)(snapshot)).collect()
    }

    /// Header line without terminator.
    pub fn header(&self) -> String {
        self.names().join(",")
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
