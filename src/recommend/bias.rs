use tracing::warn;

const MODIFIER: f64 = 0.3;
const MIDPOINT: f64 = 0.5;

/// Which side of a feature window a bound sits on.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BoundKind {
    Max,
    Min,
    /// Anything else. Biased with the default window and a warning.
    #[strum(default)]
    Unrecognized(String),
}

impl BoundKind {
    #[allow(dead_code)]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, BoundKind::Unrecognized(_))
    }
}

/// Pushes an averaged feature value away from the listener's habits.
///
/// `Max` bounds move up by 0.3 and stay within `[0.3, 1.0]`, `Min` bounds move
/// down by 0.3 and stay within `[0.0, 0.8]`. Below the midpoint only the floor
/// is applied, from the midpoint up only the ceiling.
pub fn attribute_bias(kind: &BoundKind, average: f64) -> f64 {
    let (floor, ceiling, modifier) = match kind {
        BoundKind::Max => (0.3, 1.0, MODIFIER),
        BoundKind::Min => (0.0, 0.8, -MODIFIER),
        BoundKind::Unrecognized(raw) => {
            warn!("Received an invalid recommendation bound kind: {raw}");
            (0.0, 1.0, MODIFIER)
        }
    };

    if average < MIDPOINT {
        (average + modifier).max(floor)
    } else {
        (average + modifier).min(ceiling)
    }
}
