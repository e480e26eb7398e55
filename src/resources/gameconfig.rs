//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file, with defaults for a safe
//! startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//!
//! [camera]
//! zoom = 2.0
//! rotation_speed = 1.5
//!
//! [demo]
//! frames = 120
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 360;
const DEFAULT_CAMERA_ZOOM: f64 = 2.0;
const DEFAULT_ROTATION_SPEED: f64 = 1.5;
const DEFAULT_FRAMES: u32 = 120;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Canvas width in pixels.
    pub render_width: u32,
    /// Canvas height in pixels.
    pub render_height: u32,
    /// Initial camera zoom.
    pub camera_zoom: f64,
    /// Camera yaw change per frame, in degrees.
    pub camera_rotation_speed: f64,
    /// Number of frames the host renders before exiting.
    pub frames: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            camera_rotation_speed: DEFAULT_ROTATION_SPEED,
            frames: DEFAULT_FRAMES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [camera] section
        if let Some(zoom) = config.getfloat("camera", "zoom").ok().flatten() {
            self.camera_zoom = zoom;
        }
        if let Some(speed) = config.getfloat("camera", "rotation_speed").ok().flatten() {
            self.camera_rotation_speed = speed;
        }

        // [demo] section
        if let Some(frames) = config.getuint("demo", "frames").ok().flatten() {
            self.frames = frames as u32;
        }

        info!(
            "Loaded config: {}x{} render, zoom={}, rotation_speed={}, frames={}",
            self.render_width,
            self.render_height,
            self.camera_zoom,
            self.camera_rotation_speed,
            self.frames
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("camera", "zoom", Some(self.camera_zoom.to_string()));
        config.set(
            "camera",
            "rotation_speed",
            Some(self.camera_rotation_speed.to_string()),
        );

        config.set("demo", "frames", Some(self.frames.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the render size.
    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }
}
