#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use stagehand::infrastructure::fs::AccountDb;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // deploy.toml parsing and manifest derivation must never panic
        if let Ok(config) = toml::from_str::<stagehand::Config>(content) {
            let _ = config.manifest();
            let accounts = AccountDb::Files {
                passwd: Path::new("/nonexistent/passwd"),
                group: Path::new("/nonexistent/group"),
            };
            let _ = config.permission_policy(accounts);
            let _ = config.config_policy(accounts);
        }
    }
});
