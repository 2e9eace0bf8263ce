mod common;

use common::{load_test, run_test};
use std::fs;

#[test]
fn json_scenario_tests() {
    let test_dir = "./test_data";
    let mut passed = 0;

    let mut entries: Vec<_> = fs::read_dir(test_dir)
        .expect("test_data directory")
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let test_data = load_test(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
        if let Err(failure) = run_test(&test_data) {
            panic!("Test '{}' failed [{}]", test_data.test_name, failure);
        }
        passed += 1;
    }

    assert!(passed >= 3, "expected the bundled scenarios, found {}", passed);
    println!("All {} JSON scenario tests passed", passed);
}
