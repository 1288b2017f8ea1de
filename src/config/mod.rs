use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_NOTES_FONT_SIZE, MAX_NOTES_FONT_SIZE,
    MIN_NOTES_FONT_SIZE,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Whether the tools dock is shown on startup
    #[serde(default = "default_true")]
    pub tools_dock_visible: bool,

    /// Notes editor font size in points
    #[serde(default = "default_notes_font_size")]
    pub notes_font_size: f32,

    /// Base pen color (RGB)
    #[serde(default)]
    pub pen_color: [u8; 3],

    /// Name of the last selected canvas tool ("pen", "highlighter", "eraser")
    #[serde(default = "default_active_tool")]
    pub active_tool: String,

    /// Canvas width in pixels, read once at startup
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,

    /// Canvas height in pixels, read once at startup
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,

    /// Directory of the last successful export, offered first by save dialogs
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_notes_font_size() -> f32 {
    DEFAULT_NOTES_FONT_SIZE
}

fn default_active_tool() -> String {
    "pen".to_string()
}

fn default_canvas_width() -> u32 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> u32 {
    DEFAULT_CANVAS_HEIGHT
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            tools_dock_visible: true,
            notes_font_size: DEFAULT_NOTES_FONT_SIZE,
            pen_color: [0, 0, 0],
            active_tool: default_active_tool(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            last_export_dir: None,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

#[derive(Message)]
pub struct UpdateToolsDockRequest {
    pub visible: bool,
}

#[derive(Message)]
pub struct UpdateNotesFontSizeRequest {
    pub size: f32,
}

#[derive(Message)]
pub struct UpdateActiveToolRequest {
    pub name: String,
}

#[derive(Message)]
pub struct UpdatePenColorRequest {
    pub rgb: [u8; 3],
}

/// Message to remember the directory of a successful export
#[derive(Message)]
pub struct UpdateLastExportDirRequest {
    pub path: PathBuf,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Parse config JSON, normalizing values a hand-edited file could break
fn parse_config(json: &str) -> Result<AppConfigData, serde_json::Error> {
    let mut data: AppConfigData = serde_json::from_str(json)?;
    if !data.notes_font_size.is_finite() {
        data.notes_font_size = DEFAULT_NOTES_FONT_SIZE;
    }
    data.notes_font_size = data
        .notes_font_size
        .clamp(MIN_NOTES_FONT_SIZE, MAX_NOTES_FONT_SIZE);
    Ok(data)
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// Apply all config update messages, requesting one save if anything changed
fn apply_config_updates(
    mut dock_events: MessageReader<UpdateToolsDockRequest>,
    mut font_events: MessageReader<UpdateNotesFontSizeRequest>,
    mut color_events: MessageReader<UpdatePenColorRequest>,
    mut tool_events: MessageReader<UpdateActiveToolRequest>,
    mut export_dir_events: MessageReader<UpdateLastExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    let mut changed = false;

    for event in dock_events.read() {
        changed |= config.data.tools_dock_visible != event.visible;
        config.data.tools_dock_visible = event.visible;
    }
    for event in font_events.read() {
        changed |= config.data.notes_font_size != event.size;
        config.data.notes_font_size = event.size;
    }
    for event in color_events.read() {
        changed |= config.data.pen_color != event.rgb;
        config.data.pen_color = event.rgb;
    }
    for event in tool_events.read() {
        changed |= config.data.active_tool != event.name;
        config.data.active_tool = event.name.clone();
    }
    for event in export_dir_events.read() {
        let dir = if event.path.is_dir() {
            Some(event.path.clone())
        } else {
            event.path.parent().map(|p| p.to_path_buf())
        };
        if dir.is_some() && dir != config.data.last_export_dir {
            config.data.last_export_dir = dir;
            changed = true;
        }
    }

    if changed {
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateToolsDockRequest>()
            .add_message::<UpdateNotesFontSizeRequest>()
            .add_message::<UpdatePenColorRequest>()
            .add_message::<UpdateActiveToolRequest>()
            .add_message::<UpdateLastExportDirRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    apply_config_updates,
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.tools_dock_visible);
        assert_eq!(data.notes_font_size, DEFAULT_NOTES_FONT_SIZE);
        assert_eq!(data.pen_color, [0, 0, 0]);
        assert_eq!(data.active_tool, "pen");
        assert_eq!(data.canvas_width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(data.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert!(data.last_export_dir.is_none());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            tools_dock_visible: false,
            notes_font_size: 18.0,
            pen_color: [10, 20, 30],
            active_tool: "eraser".to_string(),
            canvas_width: 800,
            canvas_height: 600,
            last_export_dir: Some(PathBuf::from("/path/to/exports")),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed = parse_config(&json).unwrap();

        assert_eq!(parsed.tools_dock_visible, data.tools_dock_visible);
        assert_eq!(parsed.notes_font_size, data.notes_font_size);
        assert_eq!(parsed.pen_color, data.pen_color);
        assert_eq!(parsed.active_tool, data.active_tool);
        assert_eq!(parsed.canvas_width, data.canvas_width);
        assert_eq!(parsed.canvas_height, data.canvas_height);
        assert_eq!(parsed.last_export_dir, data.last_export_dir);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let parsed = parse_config("{}").unwrap();
        assert!(parsed.tools_dock_visible);
        assert_eq!(parsed.notes_font_size, DEFAULT_NOTES_FONT_SIZE);
        assert_eq!(parsed.canvas_width, DEFAULT_CANVAS_WIDTH);
    }

    #[test]
    fn test_font_size_is_clamped() {
        let parsed = parse_config(r#"{"notes_font_size": 500.0}"#).unwrap();
        assert_eq!(parsed.notes_font_size, MAX_NOTES_FONT_SIZE);
        let parsed = parse_config(r#"{"notes_font_size": 1.0}"#).unwrap();
        assert_eq!(parsed.notes_font_size, MIN_NOTES_FONT_SIZE);
    }

    #[test]
    fn test_corrupted_config_is_an_error() {
        assert!(parse_config("{ not json").is_err());
    }

    #[test]
    fn test_config_reset_notification_default() {
        let notification = ConfigResetNotification::default();
        assert!(!notification.show);
        assert!(notification.reason.is_none());
    }
}
