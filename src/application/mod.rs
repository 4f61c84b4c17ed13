// Application layer - Views and the ports they drive
pub mod basemap;
pub mod canvas;
pub mod map_view;
pub mod point_log;
pub mod resources;
pub mod schematic_view;
