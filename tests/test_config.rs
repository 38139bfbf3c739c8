use std::io::Write;
use std::path::PathBuf;

use codeserver::config::{Config, ConfigError};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.resource_root, PathBuf::from("./resources"));
    assert_eq!(cfg.log_level(), tracing::Level::INFO);
}

#[test]
fn test_config_env_overrides() {
    // The only test in this binary that touches the environment.
    unsafe {
        std::env::remove_var("CONFIG");
        std::env::set_var("LISTEN", "0.0.0.0:3000");
        std::env::set_var("RESOURCE_ROOT", "/srv/war");
    }
    let cfg = Config::load().unwrap();
    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("RESOURCE_ROOT");
    }

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.resource_root, PathBuf::from("/srv/war"));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("listen_addr: \"0.0.0.0:9876\"\n").unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:9876");
    assert_eq!(cfg.resource_root, PathBuf::from("./resources"));
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn test_config_full_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr: \"127.0.0.1:9000\"").unwrap();
    writeln!(file, "resource_root: /tmp/assets").unwrap();
    writeln!(file, "log_level: debug").unwrap();

    let cfg = Config::from_yaml_file(file.path()).unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.resource_root, PathBuf::from("/tmp/assets"));
    assert_eq!(cfg.log_level(), tracing::Level::DEBUG);
}

#[test]
fn test_config_bad_level_falls_back_to_info() {
    let cfg = Config::from_yaml_str("log_level: chatty\n").unwrap();
    assert_eq!(cfg.log_level(), tracing::Level::INFO);
}

#[test]
fn test_config_invalid_yaml() {
    let err = Config::from_yaml_str("listen_addr: [unclosed\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}
