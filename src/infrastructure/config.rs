use crate::application::canvas::{PaintStyle, TextAlign};
use crate::application::map_view::{DEFAULT_ZOOM, MapStyle};
use crate::application::resources::{Bitmap, DisplayResources};
use crate::domain::colour::Colour;
use anyhow::Context;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub schematic: SchematicConfig,
    pub resources: ResourceConfig,
    pub map: MapConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SchematicConfig {
    pub width: i32,
    pub height: i32,
    pub output: PathBuf,
}

impl Default for SchematicConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            output: PathBuf::from("target/track.svg"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BitmapConfig {
    pub name: String,
    pub width: i32,
    pub height: i32,
}

impl BitmapConfig {
    fn new(name: &str, width: i32, height: i32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }

    fn to_bitmap(&self) -> Bitmap {
        Bitmap::new(self.name.clone(), self.width, self.height)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ResourceConfig {
    pub marker: BitmapConfig,
    pub compass: BitmapConfig,
    pub north_label: String,
    pub metres_label: String,
    pub track_colour: String,
    pub track_style: PaintStyle,
    pub text_colour: String,
    pub text_size: f32,
    pub text_align: TextAlign,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            marker: BitmapConfig::new("marker", 16, 16),
            compass: BitmapConfig::new("compass", 32, 32),
            north_label: "N".to_string(),
            metres_label: "m".to_string(),
            track_colour: "#000000".to_string(),
            track_style: PaintStyle::FillAndStroke,
            text_colour: "#000000".to_string(),
            text_size: 12.0,
            text_align: TextAlign::Centre,
        }
    }
}

impl ResourceConfig {
    pub fn to_resources(&self) -> anyhow::Result<DisplayResources> {
        Ok(DisplayResources {
            marker: self.marker.to_bitmap(),
            compass: self.compass.to_bitmap(),
            north_label: self.north_label.clone(),
            metres_label: self.metres_label.clone(),
            track_colour: parse_colour("resources.track_colour", &self.track_colour)?,
            track_style: self.track_style,
            text_colour: parse_colour("resources.text_colour", &self.text_colour)?,
            text_size: self.text_size,
            text_align: self.text_align,
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub default_zoom: u8,
    pub path_colour: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            path_colour: "#0000ff".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReplayConfig {
    pub track_file: PathBuf,
    pub interval_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            track_file: PathBuf::from("data/sample_track.json"),
            interval_ms: 250,
        }
    }
}

impl DisplayConfig {
    pub fn map_style(&self) -> anyhow::Result<MapStyle> {
        Ok(MapStyle {
            default_zoom: self.map.default_zoom,
            path_colour: parse_colour("map.path_colour", &self.map.path_colour)?,
            marker: self.resources.marker.to_bitmap(),
        })
    }
}

fn parse_colour(key: &str, value: &str) -> anyhow::Result<Colour> {
    value
        .parse()
        .with_context(|| format!("Invalid colour for {}", key))
}

/// Loads `config/display.*` when present, overridden by
/// `TRACK_DISPLAY__SECTION__KEY` environment variables.
pub fn load_display_config() -> anyhow::Result<DisplayConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/display").required(false))
        .add_source(
            config::Environment::with_prefix("TRACK_DISPLAY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    build_display_config(builder)
}

fn build_display_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<DisplayConfig> {
    let settings = builder.build()?;

    Ok(settings.try_deserialize()?)
}
