use criterion::criterion_main;

mod handling;
mod identify;

criterion_main!(identify::identify_benches, handling::handling_benches);
