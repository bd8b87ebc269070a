use std::fmt;

// ---------------------------------------------------------------------------
// Host flight events
// ---------------------------------------------------------------------------

/// Flight events a host may report between steps.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightEventKind {
    Launch,
    Ignition,
    LiftOff,
    LaunchRodClearance,
    Burnout { stage: usize },
    StageSeparation { from: usize, to: usize },
    Apogee,
    RecoveryDeployment,
    GroundHit,
    SimulationEnd,
    /// Altitude crossings only exist to schedule integration steps.
    Altitude,
    Custom(String),
}

impl FlightEventKind {
    /// Whether the event is worth annotating in an export.
    pub fn is_notable(&self) -> bool {
        !matches!(self, Self::Altitude)
    }
}

impl fmt::Display for FlightEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch => write!(f, "Launch"),
            Self::Ignition => write!(f, "Ignition"),
            Self::LiftOff => write!(f, "Lift-off"),
            Self::LaunchRodClearance => write!(f, "Launch rod clearance"),
            Self::Burnout { stage } => write!(f, "Burnout (stage {stage})"),
            Self::StageSeparation { from, to } => write!(f, "Stage separation ({from} -> {to})"),
            Self::Apogee => write!(f, "Apogee"),
            Self::RecoveryDeployment => write!(f, "Recovery deployment"),
            Self::GroundHit => write!(f, "Ground hit"),
            Self::SimulationEnd => write!(f, "Simulation end"),
            Self::Altitude => write!(f, "Altitude"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altitude_events_are_not_notable() {
        assert!(!FlightEventKind::Altitude.is_notable());
        assert!(FlightEventKind::Apogee.is_notable());
        assert!(FlightEventKind::Custom("Drogue".into()).is_notable());
    }

    #[test]
    fn display_is_single_line() {
        let k = FlightEventKind::StageSeparation { from: 0, to: 1 };
        assert_eq!(k.to_string(), "Stage separation (0 -> 1)");
        assert!(!FlightEventKind::Burnout { stage: 2 }.to_string().contains('\n'));
    }
}
