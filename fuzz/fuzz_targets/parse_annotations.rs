#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpkin_core::io::read_annotations;

fuzz_target!(|data: &[u8]| {
    if let Ok(annotations) = read_annotations(data) {
        assert!(annotations.values().all(|terms| !terms.is_empty()));
    }
});
