// Presentation layer - Dispatch loop and the surfaces it drives
pub mod display_loop;
pub mod replay;
pub mod schematic_surface;
