pub mod axes;
pub mod colors;
pub mod legend;
pub mod panel;
pub mod renderer;

pub use colors::Colors;
pub use legend::{Legend, LegendEntry};
pub use panel::{LinearScale, Panel, nice_ticks};
pub use renderer::{FontSet, HAlign, Renderer, TextStyle, VAlign};
