//! Builds the default PET ring and prints its materials and volume tree.
//!
//! Usage:
//! ```text
//! cargo run --example ring
//! RUST_LOG=petring=debug cargo run --example ring   # every placement
//! ```

use petring::operations::query::{CheckOverlaps, Mass};
use petring::volume::{GeometryStore, PhysicalVolumeId};
use petring::PetringError;

fn main() -> Result<(), PetringError> {
    // Default: WARN for everything, INFO for petring.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("petring=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let detector = petring::construct()?;
    let store = &detector.store;

    let mut printed = Vec::new();
    for (_, lv) in store.logical_volumes() {
        let material = lv.material();
        if !printed.contains(&material.name()) {
            print!("{material}");
            printed.push(material.name());
        }
    }

    println!();
    print_tree(store, detector.world, 0)?;

    let scoring = store.logical_volume(detector.scoring_volume)?;
    println!();
    println!("scoring volume: {}", scoring.name());
    println!("total mass: {:.1} kg", Mass::new(detector.world).execute(store)? / 1000.0);
    println!(
        "overlaps: {}",
        CheckOverlaps::default().execute(store)?.len()
    );
    Ok(())
}

fn print_tree(store: &GeometryStore, id: PhysicalVolumeId, depth: usize) -> Result<(), PetringError> {
    let node = store.physical_volume(id)?;
    let lv = store.logical_volume(node.logical)?;
    let t = node.transform.translation.vector;
    println!(
        "{:indent$}{}:{} [{} / {}] at ({:.1}, {:.1}, {:.1}) mm",
        "",
        node.name,
        node.copy_number,
        lv.solid().name(),
        lv.material().name(),
        t.x,
        t.y,
        t.z,
        indent = depth * 2
    );
    for &child in &node.children {
        print_tree(store, child, depth + 1)?;
    }
    Ok(())
}
