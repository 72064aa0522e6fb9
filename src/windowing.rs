pub mod ephemeris;
pub mod transit_windows;

pub use ephemeris::Ephemeris;
pub use transit_windows::{
    extract, output_file_name, persist_window, TransitWindow, TransitWindows, WindowBounds,
    WindowOutcome,
};
