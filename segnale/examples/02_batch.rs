use std::sync::Arc;
use std::time::Duration;

use segnale::{EntityId, Segnale, SignalKind};
use segnale_mock::MockStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = Arc::new(MockStore::new());
    let engine = Segnale::builder()
        .store(store)
        .window(SignalKind::Price, 60, 20)
        .build()?;

    // FAIL and FAIL-PERSIST show per-entity isolation.
    let entities = ["SYNTH-1", "SYNTH-2", "SYNTH-3", "LINEAR", "FAIL", "FAIL-PERSIST"]
        .into_iter()
        .map(EntityId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let report = engine
        .batch()
        .entities(&entities)?
        .concurrency(3)?
        .entity_timeout(Duration::from_secs(5))
        .run()
        .await?;

    for r in &report.reports {
        match r.skipped {
            Some(reason) => println!("{}: skipped ({reason:?})", r.entity),
            None => println!(
                "{}: {} rows, price estimator {:?}, {} issues",
                r.entity,
                r.rows_written,
                r.estimators.get(SignalKind::Price),
                r.issues.len()
            ),
        }
    }
    for f in &report.failures {
        println!("{}: FAILED: {}", f.entity, f.error);
    }
    println!("total rows: {}", report.total_rows);

    Ok(())
}
