//! Concurrent config writes serialized.

mod common;

use hostsfile::config::{Config, ConfigPaths};
use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_writes_serialized() {
    let dir = common::temp_dir();
    let paths = ConfigPaths::for_test(dir.path());

    let barrier = Arc::new(Barrier::new(3));
    let handles: Vec<_> = ["/a/hosts", "/b/hosts"]
        .into_iter()
        .map(|p| {
            let paths = paths.clone();
            let b = Arc::clone(&barrier);
            thread::spawn(move || {
                b.wait();
                let config = Config {
                    hosts_file: Some(PathBuf::from(p)),
                    ..Config::default()
                };
                config.save(&paths).unwrap();
            })
        })
        .collect();

    barrier.wait();
    for h in handles {
        h.join().unwrap();
    }

    let loaded = Config::load(&paths).unwrap();
    let file = loaded.hosts_file.unwrap();
    assert!(file == PathBuf::from("/a/hosts") || file == PathBuf::from("/b/hosts"));
}
