pub mod app;
pub mod event;
pub mod input;
pub mod panels;
pub mod scroll;
pub mod surface;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use surface::ScrollSurface;
pub use theme::Theme;
