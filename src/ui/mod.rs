mod app;
mod card_panel;
mod images;
mod state;

pub use app::{launch_gui, CardBrowserApp};
pub use state::{ChannelRenderer, DisplayState, Panel, RenderCommand};
