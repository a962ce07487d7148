use segnale_core::{RawObservation, SignalKind};

pub mod linear;
pub mod synthetic;

/// Fixture series for `entity`, or `None` if the entity has no fixture.
pub fn by_entity(entity: &str, kind: SignalKind) -> Option<Vec<RawObservation>> {
    match entity {
        // persistence failures still need a scoreable series
        "LINEAR" | "FAIL-PERSIST" => Some(linear::series(kind)),
        s => s
            .strip_prefix("SYNTH-")
            .map(|tag| synthetic::series(synthetic::seed_for(tag), kind)),
    }
}
