use serial_test::serial;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.http_port, 8000);
    assert_eq!(settings.server.ws_port, 8001);
    assert_eq!(settings.store.path, "blog_db");
    assert_eq!(settings.notify.queue_capacity, 256);
    assert_eq!(settings.notify.finish_delay_ms, 3000);
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    use std::{env, fs};
    use tempfile::TempDir;

    // Create a temporary directory and set it as current dir so load_config
    // will pick up config/default.toml from there.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let toml = r#"
        [server]
        host = "0.0.0.0"
        http_port = 9000
        ws_port = 9001

        [store]
        path = "somewhere_else"

        [notify]
        queue_capacity = 8
        finish_delay_ms = 10
    "#;
    fs::create_dir_all("config").expect("create config dir");
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config().expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.http_port, 9000);
    assert_eq!(cfg.server.ws_port, 9001);
    assert_eq!(cfg.store.path, "somewhere_else");
    assert_eq!(cfg.notify.queue_capacity, 8);
    assert_eq!(cfg.notify.finish_delay_ms, 10);

    env::set_current_dir(orig).expect("restore cwd");
}

#[test]
#[serial]
fn test_environment_overrides_host() {
    temp_env::with_var("SERVER_HOST", Some("10.0.0.1"), || {
        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.server.host, "10.0.0.1");
    });
}

#[test]
#[serial]
fn test_missing_sources_fall_back_to_defaults() {
    use std::env;
    use tempfile::TempDir;

    // An empty cwd has no config/default.toml at all.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let cfg = load_config().expect("load_config failed");
    assert_eq!(cfg.server.http_port, Settings::default().server.http_port);

    env::set_current_dir(orig).expect("restore cwd");
}
