//! Background loading of the card image for the card panel.

use crate::api::ScryfallClient;
use eframe::egui;
use log::{debug, error, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Message sent from background image loader tasks
pub struct LoadedImage {
    pub url: String,
    /// None when the download failed
    pub bytes: Option<Vec<u8>>,
}

/// Texture for the card on screen. Only the most recently requested URL is
/// kept; late downloads for earlier cards are dropped. A failed download is
/// not retried until another card has been requested.
pub struct CardImages {
    current: Option<(String, egui::TextureHandle)>,
    requested: Option<String>,
    in_flight: bool,
    sender: UnboundedSender<LoadedImage>,
    receiver: UnboundedReceiver<LoadedImage>,
}

impl Default for CardImages {
    fn default() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            current: None,
            requested: None,
            in_flight: false,
            sender,
            receiver,
        }
    }
}

impl CardImages {
    /// Start downloading `url` unless it was the last one requested
    pub fn request(&mut self, ctx: &egui::Context, runtime: &Runtime, client: &ScryfallClient, url: &str) {
        if self.requested.as_deref() == Some(url) {
            return;
        }

        debug!("Starting async image load for {}", url);
        self.requested = Some(url.to_string());
        self.in_flight = true;

        let sender = self.sender.clone();
        let client = client.clone();
        let ctx = ctx.clone();
        let url = url.to_string();

        runtime.spawn(async move {
            let bytes = match client.fetch_image(&url).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!("Failed to fetch card image {}: {}", url, e);
                    None
                }
            };
            if sender.send(LoadedImage { url, bytes }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Turn finished downloads into textures (non-blocking)
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.receiver.try_recv() {
            self.accept(ctx, loaded);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Texture for `url`, if that is the image currently loaded
    pub fn texture_for(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.current
            .as_ref()
            .filter(|(current_url, _)| current_url == url)
            .map(|(_, texture)| texture)
    }

    fn accept(&mut self, ctx: &egui::Context, loaded: LoadedImage) {
        if self.requested.as_deref() != Some(loaded.url.as_str()) {
            debug!("Dropping image for {}, no longer shown", loaded.url);
            return;
        }
        self.in_flight = false;

        let Some(bytes) = loaded.bytes else {
            return;
        };

        match decode_image(&bytes) {
            Ok(color_image) => {
                let texture = ctx.load_texture(
                    format!("card_{}", loaded.url),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                info!("Created texture for {}", loaded.url);
                self.current = Some((loaded.url, texture));
            }
            Err(e) => {
                error!("Failed to decode image {}: {}", loaded.url, e);
            }
        }
    }
}

fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}
