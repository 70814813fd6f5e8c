//! A producer/consumer split across the erasure boundary: the producer
//! composes a pipeline over its private storage, the consumer iterates
//! without ever naming the pipeline's type.

use std::collections::BTreeMap;

use opaqueseq::{OpaqueSequence, views::{Mapped, SharedSlice}};

/// The producer: owns a keyed store and hands out its values as an opaque
/// sequence. Callers cannot tell (and cannot depend on) how the values
/// are stored or transformed.
struct Inventory {
    stock: BTreeMap<String, u32>,
}

impl Inventory {
    fn new() -> Self {
        let stock = [("bolts", 250), ("nuts", 480), ("washers", 75)]
            .into_iter()
            .map(|(name, count)| (name.to_owned(), count))
            .collect();
        Self { stock }
    }

    /// All stock counts, in key order.
    fn counts(&self) -> OpaqueSequence<u32> {
        OpaqueSequence::new(SharedSlice::new(self.stock.values().copied()))
    }

    /// Human-readable lines, derived lazily from the same storage.
    fn report_lines(&self) -> OpaqueSequence<String> {
        let entries = SharedSlice::new(
            self.stock
                .iter()
                .map(|(name, count)| (name.clone(), *count)),
        );
        OpaqueSequence::new(Mapped::new(entries, |(name, count): &(String, u32)| {
            format!("{name}: {count}")
        }))
    }
}

/// The consumer: generic over nothing, linked against nothing but the
/// element type.
fn total(counts: &OpaqueSequence<u32>) -> u32 {
    counts.iter().sum()
}

fn main() {
    let inventory = Inventory::new();

    for line in &inventory.report_lines() {
        println!("{line}");
    }
    println!("total items: {}", total(&inventory.counts()));

    // Cursors walk the same data manually, including backward.
    let counts = inventory.counts();
    let mut cursor = counts.end();
    cursor.retreat().expect("shared storage is bidirectional");
    println!("last count: {}", cursor.get().expect("sequence is non-empty"));
}
