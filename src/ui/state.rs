use crate::controller::Renderer;
use crate::formatters::CardView;
use crate::models::{SetOption, SetSummary};
use eframe::egui;
use tokio::sync::mpsc::UnboundedSender;

pub const ALL_SETS_LABEL: &str = "All sets";

/// What the controller asked the window to show
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Loading,
    Card(CardView),
    Error(String),
    NoResults,
    Idle,
    SetOptions(Vec<SetOption>),
}

/// Renderer used by the window: forwards each call to the UI thread and
/// wakes it up. Controller tasks run on the tokio runtime, egui only touches
/// its state from `update`.
pub struct ChannelRenderer {
    sender: UnboundedSender<RenderCommand>,
    ctx: egui::Context,
}

impl ChannelRenderer {
    pub fn new(sender: UnboundedSender<RenderCommand>, ctx: egui::Context) -> Self {
        Self { sender, ctx }
    }

    fn send(&self, command: RenderCommand) {
        if self.sender.send(command).is_err() {
            log::debug!("Window closed, dropping render command");
            return;
        }
        self.ctx.request_repaint();
    }
}

impl Renderer for ChannelRenderer {
    fn show_loading(&self) {
        self.send(RenderCommand::Loading);
    }

    fn show_card(&self, card: &CardView) {
        self.send(RenderCommand::Card(card.clone()));
    }

    fn show_error(&self, message: &str) {
        self.send(RenderCommand::Error(message.to_string()));
    }

    fn show_no_results(&self) {
        self.send(RenderCommand::NoResults);
    }

    fn show_idle(&self) {
        self.send(RenderCommand::Idle);
    }

    fn populate_set_options(&self, sets: &[SetSummary]) {
        self.send(RenderCommand::SetOptions(
            sets.iter().map(SetOption::from).collect(),
        ));
    }
}

/// The visible panel. One enum, so at most one panel can be shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    #[default]
    Idle,
    Loading,
    Card(CardView),
    Error(String),
    NoResults,
}

#[derive(Debug, Default)]
pub struct DisplayState {
    pub panel: Panel,
    pub set_options: Vec<SetOption>,
    /// Selected set code, empty for "All sets"
    pub selected_set: String,
    pub search_term: String,
}

impl DisplayState {
    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Loading => self.panel = Panel::Loading,
            RenderCommand::Card(view) => self.panel = Panel::Card(view),
            RenderCommand::Error(message) => self.panel = Panel::Error(message),
            RenderCommand::NoResults => self.panel = Panel::NoResults,
            RenderCommand::Idle => self.panel = Panel::Idle,
            RenderCommand::SetOptions(options) => self.set_options = options,
        }
    }

    /// Label of the selected set for the selector button
    pub fn selected_label(&self) -> &str {
        self.set_options
            .iter()
            .find(|o| o.code == self.selected_set)
            .map(|o| o.label.as_str())
            .unwrap_or(ALL_SETS_LABEL)
    }

    /// Image of the card on screen, if any
    pub fn card_image_url(&self) -> Option<&str> {
        match &self.panel {
            Panel::Card(view) => view.image_url.as_deref(),
            _ => None,
        }
    }
}
