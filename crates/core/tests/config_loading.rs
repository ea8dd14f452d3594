use depweight_core::config::{AnalyzerConfig, ConfigError, CONFIG_FILE_NAMES};
use depweight_core::render::DEFAULT_LABEL_FORMAT;

#[test]
fn defaults_match_go_toolchain() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.nm.program, "go");
    assert_eq!(config.nm.args, vec!["tool", "nm", "-size"]);
    assert!(!config.graph.include_std);
    assert_eq!(config.graph.label_format, DEFAULT_LABEL_FORMAT);
    assert!(config.graph.std_list.is_none());
    assert!(config.weight.limit.is_none());
}

#[test]
fn partial_json_fills_defaults() {
    let config = AnalyzerConfig::from_json_str(r#"{"graph":{"include_std":true}}"#).unwrap();
    assert!(config.graph.include_std);
    assert_eq!(config.graph.label_format, DEFAULT_LABEL_FORMAT);
    assert_eq!(config.nm.program, "go");
}

#[test]
fn yaml_config_and_empty_document() {
    let yaml = "nm:\n  program: /usr/local/go/bin/go\nweight:\n  limit: 5\n";
    let config = AnalyzerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.nm.program, "/usr/local/go/bin/go");
    assert_eq!(config.nm.args, vec!["tool", "nm", "-size"]);
    assert_eq!(config.weight.limit, Some(5));

    assert_eq!(AnalyzerConfig::from_yaml_str("  \n").unwrap(), AnalyzerConfig::default());
}

#[test]
fn load_rejects_unknown_extension_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let toml = dir.path().join("depweight.toml");
    std::fs::write(&toml, "").unwrap();
    assert!(matches!(AnalyzerConfig::load(&toml), Err(ConfigError::UnsupportedFormat(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(AnalyzerConfig::load(&missing), Err(ConfigError::Io { .. })));

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "graph: [1, 2").unwrap();
    assert!(matches!(AnalyzerConfig::load(&bad), Err(ConfigError::Yaml(_))));
}

#[test]
fn discover_probes_known_names_in_order() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AnalyzerConfig::discover(dir.path()).unwrap().is_none());

    std::fs::write(dir.path().join(CONFIG_FILE_NAMES[1]), "weight:\n  limit: 2\n").unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAMES[0]), r#"{"weight":{"limit":1}}"#).unwrap();

    let (path, config) = AnalyzerConfig::discover(dir.path()).unwrap().expect("found");
    assert_eq!(path.file_name().unwrap(), "depweight.json");
    assert_eq!(config.weight.limit, Some(1));
}

#[test]
fn config_round_trips_through_json() {
    let mut config = AnalyzerConfig::default();
    config.graph.std_list = Some("std.txt".into());
    let body = serde_json::to_string(&config).unwrap();
    assert_eq!(AnalyzerConfig::from_json_str(&body).unwrap(), config);
}
