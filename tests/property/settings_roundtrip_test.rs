//! Property-based tests for PluginSettings serialization round-trip.
//!
//! These tests verify that PluginSettings can be serialized to JSON
//! and deserialized back without data loss for arbitrary valid inputs.

use bookmark_vault::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use bookmark_vault::types::settings::PluginSettings;
use proptest::prelude::*;

fn arb_plugin_settings() -> impl Strategy<Value = PluginSettings> {
    ("[a-zA-Z0-9 _/-]{1,40}", any::<bool>(), 0u64..60_000).prop_map(
        |(output_folder_path, check_accessibility, check_delay_ms)| PluginSettings {
            output_folder_path,
            check_accessibility,
            check_delay_ms,
        },
    )
}

// **Property 1: Settings serialization round-trip**
//
// *For any* valid PluginSettings, serializing to JSON then deserializing
// SHALL produce an equivalent object.
proptest! {
    #[test]
    fn settings_json_roundtrip(settings in arb_plugin_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: PluginSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}

// **Property 2: Settings persist through the engine**
//
// *For any* valid PluginSettings written field by field through `set_value`,
// a fresh engine loading the same file SHALL see the same values.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_persist_through_engine(settings in arb_plugin_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.load().unwrap();
        engine.set_value("outputFolderPath", serde_json::json!(settings.output_folder_path)).unwrap();
        engine.set_value("checkAccessibility", serde_json::json!(settings.check_accessibility)).unwrap();
        engine.set_value("checkDelayMs", serde_json::json!(settings.check_delay_ms)).unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
