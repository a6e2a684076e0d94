//! This bench test measures saving and reloading a large inventory through
//! the atomic file writer.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use inventory::Inventory;
use tempfile::TempDir;

fn populated(items: u64) -> Inventory {
    let mut inventory = Inventory::new();
    for i in 0..items {
        inventory.add(&format!("item-{i:05}"), i % 97).unwrap();
    }
    inventory
}

fn save_load(c: &mut Criterion) {
    let inventory = populated(10_000);

    c.bench_function("save 10k items", |b| {
        b.iter_batched(
            || TempDir::new().unwrap(),
            |tmp| inventory::save(&inventory, &tmp.path().join("inventory.json")).unwrap(),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("load 10k items", |b| {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inventory.json");
        inventory::save(&inventory, &path).unwrap();

        b.iter(|| inventory::load(&path).unwrap());
    });
}

criterion_group!(benches, save_load);
criterion_main!(benches);
