//! View objects bound from XMILE `<view>` content.

pub mod pie_input;
pub mod plot;

pub use pie_input::PieInput;
pub use plot::{EntityRef, PenStyle, Plot, PlotScale};
