// Infrastructure layer - Adapters for the point log, drawing surfaces and configuration
pub mod config;
pub mod headless_basemap;
pub mod memory_point_log;
pub mod svg_canvas;
pub mod track_file;
