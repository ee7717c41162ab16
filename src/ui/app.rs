use eframe::egui;
use egui::ViewportBuilder;
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use super::{
    card_panel::CardPanel,
    images::CardImages,
    state::{ChannelRenderer, DisplayState, RenderCommand, ALL_SETS_LABEL},
};
use crate::{api::ScryfallClient, config::AppConfig, controller::ViewController};

type BrowserController = ViewController<ScryfallClient, ChannelRenderer>;
type StartupError = Box<dyn std::error::Error + Send + Sync>;

/// User input collected during a frame, dispatched after drawing
enum UserAction {
    RandomCard,
    SelectSet(String),
    Search(String),
}

pub struct CardBrowserApp {
    runtime: Runtime,
    controller: Arc<BrowserController>,
    /// Shared with the controller; used here for image downloads
    client: ScryfallClient,
    commands: UnboundedReceiver<RenderCommand>,
    display: DisplayState,
    images: CardImages,
}

impl CardBrowserApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self, StartupError> {
        info!("Initializing CardBrowserApp against {}", config.base_url);

        debug!("Creating Tokio runtime");
        let runtime = Runtime::new()?;
        let client = ScryfallClient::new(&config)?;

        let (tx, rx) = unbounded_channel();
        let renderer = ChannelRenderer::new(tx, cc.egui_ctx.clone());
        let controller = Arc::new(ViewController::new(client.clone(), renderer));

        let app = Self {
            runtime,
            controller,
            client,
            commands: rx,
            display: DisplayState::default(),
            images: CardImages::default(),
        };
        app.dispatch(|controller| async move { controller.initialize().await });

        Ok(app)
    }

    fn dispatch<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<BrowserController>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(action(Arc::clone(&self.controller)));
    }

    fn handle(&self, action: UserAction) {
        match action {
            UserAction::RandomCard => {
                self.dispatch(|controller| async move { controller.fetch_random_card().await })
            }
            UserAction::SelectSet(code) => {
                self.dispatch(move |controller| async move { controller.select_set(&code).await })
            }
            UserAction::Search(term) => {
                self.dispatch(move |controller| async move { controller.search_by_name(&term).await })
            }
        }
    }

    /// Apply everything the controller sent since the last frame (non-blocking)
    fn drain_commands(&mut self, ctx: &egui::Context) {
        while let Ok(command) = self.commands.try_recv() {
            self.display.apply(command);
        }

        if let Some(url) = self.display.card_image_url() {
            let url = url.to_string();
            self.images.request(ctx, &self.runtime, &self.client, &url);
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) -> Option<UserAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Set:");
            let previous = self.display.selected_set.clone();
            let selected_text = self.display.selected_label().to_string();
            let display = &mut self.display;
            egui::ComboBox::from_id_salt("set_filter")
                .selected_text(selected_text)
                .width(280.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut display.selected_set, String::new(), ALL_SETS_LABEL);
                    for option in &display.set_options {
                        ui.selectable_value(
                            &mut display.selected_set,
                            option.code.clone(),
                            option.label.as_str(),
                        );
                    }
                });
            if display.selected_set != previous {
                action = Some(UserAction::SelectSet(display.selected_set.clone()));
            }

            ui.separator();

            if ui.button("🎲 Random Card").clicked() {
                action = Some(UserAction::RandomCard);
            }

            ui.separator();

            let response = ui.add(
                egui::TextEdit::singleline(&mut display.search_term)
                    .desired_width(220.0)
                    .hint_text("Search card name..."),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || enter_pressed {
                action = Some(UserAction::Search(display.search_term.clone()));
            }
        });

        action
    }
}

impl eframe::App for CardBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_commands(ctx);
        self.images.poll(ctx);

        let mut action = None;
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("MTG Card Browser");
            ui.add_space(6.0);
            action = self.show_controls(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                CardPanel::show(ui, &self.display.panel, &self.images);
            });
        });

        if let Some(action) = action {
            self.handle(action);
        }
    }
}

pub fn launch_gui(config: AppConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("MTG Card Browser"),
        ..Default::default()
    };

    eframe::run_native(
        "MTG Card Browser",
        options,
        Box::new(move |cc| Ok(Box::new(CardBrowserApp::new(cc, config)?))),
    )
}
