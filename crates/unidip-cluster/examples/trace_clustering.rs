//! Cluster a three-peak histogram and print every partitioner stage
//!
//! Run with `RUST_LOG=unidip_cluster=debug` to also see the tracing output.

use tracing_subscriber::EnvFilter;
use unidip_cluster::test_data::TestDistributions;
use unidip_cluster::{ClusterEvent, RecordingVisualizer, UnidipBuilder};

fn main() -> unidip_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bins = TestDistributions::three_peak_histogram();
    let unidip = UnidipBuilder::new(RecordingVisualizer::new())
        .histogram(true)
        .seed(42)
        .build();

    let clusters = unidip.cluster(&bins)?;

    for event in unidip.visualizer().events() {
        match event {
            ClusterEvent::Slice {
                range,
                kind,
                test,
                decision,
            } => match test {
                Some(test) => println!("{:?} slice {:?}: {} -> {:?}", kind, range, test, decision),
                None => println!("{:?} slice {:?}: {:?}", kind, range, decision),
            },
            ClusterEvent::Gate {
                range,
                test,
                passed,
            } => println!("gate {:?}: p={:?} passed={}", range, test.p_value, passed),
            ClusterEvent::Widening {
                range,
                modal,
                widened,
            } => println!("widen {:?}: {} -> {}", range, modal, widened),
            ClusterEvent::Ecdf { support_len } => println!("{} bins", support_len),
            ClusterEvent::Final { .. } => {}
        }
    }

    println!("\nDetected {} clusters", clusters.len());
    for (i, cluster) in clusters.iter().enumerate() {
        println!("Cluster {}: {}", i + 1, cluster);
    }
    Ok(())
}
