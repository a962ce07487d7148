use std::sync::Arc;

use segnale::{EntityId, ScoreColumn, Segnale};
use segnale_mock::MockStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logs go to stderr; set RUST_LOG=debug (and build with --features tracing) for spans.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 2. An in-memory store with fixture data serves as both source and sink.
    let store = Arc::new(MockStore::new());
    let engine = Segnale::builder().store(store.clone()).build()?;

    // 3. Dry run first to look at the table before it is written.
    let entity = EntityId::new("LINEAR")?;
    if let Some(scored) = engine.score(&entity).await?.scored() {
        println!("estimators: {:?}", scored.estimators);
        for row in scored.rows.iter().step_by(15) {
            let cells: Vec<String> = ScoreColumn::ALL
                .iter()
                .map(|c| match row.get(*c) {
                    Some(z) => format!("{c}={z:+.3}"),
                    None => format!("{c}=null"),
                })
                .collect();
            println!("{} {}", row.date, cells.join(" "));
        }
    }

    // 4. Persist.
    let report = engine.process(&entity).await?;
    println!("{} rows written", report.rows_written);
    for issue in &report.issues {
        println!("warning: {}", issue.message);
    }

    Ok(())
}
