//! Benchmark utilities.

use auxkit_hash::Key;
use rand::Rng;
use std::fmt::Write;

/// Generate random data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate a batch of random keys.
pub fn generate_keys(count: usize) -> Vec<Key> {
    (0..count).map(|_| Key::generate()).collect()
}

/// Generate a migration script of `count` insert statements.
pub fn migration_script(count: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut script = String::from("CREATE TABLE bench (id INTEGER PRIMARY KEY, value INTEGER);\n");
    for id in 0..count {
        let value: i32 = rng.gen();
        let _ = writeln!(script, "INSERT INTO bench (id, value)\n  VALUES ({id}, {value});");
    }
    script
}
