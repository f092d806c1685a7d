//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use starfield::config::AppConfig;
use starfield_core::ProjectionMode;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("starfield-config-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("STARFIELD_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("STARFIELD_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.window.title, builtin.window.title);
    assert_eq!(config.camera.fov, builtin.camera.fov);
    assert_eq!(config.camera.projection, builtin.camera.projection);
    assert_eq!(config.assets.path, builtin.assets.path);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("layering");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Default\"\nwidth = 800\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[window]\ntitle = \"User\"\n[camera]\nprojection = \"orthographic\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "User");
    assert_eq!(config.window.width, 800);
    assert_eq!(config.camera.projection, ProjectionMode::Orthographic);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_env_overrides_user_file() {
    let dir = scratch_dir("env");
    fs::write(dir.join("user.toml"), "[scene]\nseed = 1\n").unwrap();

    std::env::set_var("STARFIELD_SCENE__SEED", "42");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("STARFIELD_SCENE__SEED");

    assert_eq!(config.unwrap().scene.seed, Some(42));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.scene.seed, None);
}

#[test]
#[serial]
fn test_invalid_value_is_error() {
    let dir = scratch_dir("invalid");
    fs::write(dir.join("default.toml"), "[camera]\nprojection = \"fisheye\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().starts_with("Configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}
