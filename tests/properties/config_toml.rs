//! Property tests for `deploy.toml` loading.

use proptest::prelude::*;
use tempfile::tempdir;

use stagehand::config::Config;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: loading arbitrary file content returns a value or an
    /// error, never a panic.
    #[test]
    fn property_load_never_panics(content in "(?s).{0,512}") {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, &content).unwrap();

        let _ = Config::load_with_warnings(&path);
    }

    /// PROPERTY: any configured delay survives a load unchanged.
    #[test]
    fn property_trigger_delay_is_kept(delay in 0u64..86_400) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, format!("[trigger]\ndelay_secs = {delay}\n")).unwrap();

        let (config, warnings) = Config::load_with_warnings(&path).unwrap();
        prop_assert_eq!(config.trigger.delay_secs, delay);
        prop_assert!(warnings.is_empty());
    }
}
