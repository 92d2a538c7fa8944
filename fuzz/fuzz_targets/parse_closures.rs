#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpkin_core::io::read_closures;

fuzz_target!(|data: &[u8]| {
    if let Ok(edges) = read_closures(data) {
        for (child, parent) in &edges {
            assert!(!child.is_empty());
            assert!(!parent.is_empty());
        }
    }
});
