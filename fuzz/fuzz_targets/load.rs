#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera::{load_all_with, schema, Options};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let options = Options::default().on_warning(|_| {});
        for schema in [schema::failsafe(), schema::core(), schema::default_full()] {
            let outcome = load_all_with(s, schema, &options, |document| {
                let _ = document.to_key_string();
                Ok(())
            });
            if let Err(error) = outcome {
                assert!(error.marker().index() <= s.len());
                let _ = error.render();
            }
        }
    }
});
