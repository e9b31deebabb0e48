#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use stagehand::ChangeSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // One changed path per line, as `git diff-tree --name-only` prints them
        let set = ChangeSet::from_paths(content.lines(), Path::new("/repo"));
        for path in ["index.html", "images", "nginx/admin-portal.conf"] {
            let _ = set.touches(Path::new(path));
        }
    }
});
