//! Desktop window
//!
//! One Merge button that drives the native dialog sequence, a status banner
//! colored by outcome, and optional footer links that open in the browser.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::ExternalLink;
use crate::executor::MergeExecutor;
use crate::open::Opener;
use crate::surface::{
    Activation, Banner, DocumentPicker, DocumentRole, MergeFlow, Tone, DEFAULT_OUTPUT_NAME,
};

pub const WINDOW_TITLE: &str = "Resume Merger";

/// Native file dialogs
#[derive(Debug, Default)]
pub struct NativePicker;

impl DocumentPicker for NativePicker {
    fn pick_document(&mut self, role: DocumentRole) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(role.dialog_title())
            .add_filter("PDF Files", &["pdf"])
            .pick_file()
    }

    fn pick_destination(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save Merged PDF")
            .set_file_name(DEFAULT_OUTPUT_NAME)
            .add_filter("PDF Files", &["pdf"])
            .save_file()
    }
}

fn banner_fill(tone: Tone) -> egui::Color32 {
    match tone {
        Tone::Success => egui::Color32::from_rgba_unmultiplied(76, 175, 80, 180),
        Tone::Error => egui::Color32::from_rgba_unmultiplied(244, 67, 54, 180),
        Tone::Warning => egui::Color32::from_rgba_unmultiplied(255, 193, 7, 180),
        Tone::Notice => egui::Color32::from_rgb(90, 90, 90),
    }
}

pub struct MergerWindow<E> {
    flow: MergeFlow<E>,
    picker: NativePicker,
    opener: Arc<dyn Opener>,
    links: Vec<ExternalLink>,
}

impl<E: MergeExecutor + 'static> MergerWindow<E> {
    pub fn new(flow: MergeFlow<E>, opener: Arc<dyn Opener>, links: Vec<ExternalLink>) -> Self {
        Self {
            flow,
            picker: NativePicker,
            opener,
            links,
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(Banner { tone, text }) = self.flow.banner().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Frame::NONE
            .fill(banner_fill(tone))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });

        if dismissed {
            self.flow.dismiss_banner();
        }
    }

    fn show_links(&self, ui: &mut egui::Ui) {
        if self.links.is_empty() {
            return;
        }

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for link in &self.links {
                // Never navigate inside the window; hand the link to the browser
                if ui.link(&link.label).on_hover_text(&link.url).clicked() {
                    if let Err(e) = self.opener.open_url(&link.url) {
                        tracing::warn!(url = %link.url, error = %e, "failed to open link");
                    }
                }
            }
        });
    }
}

impl<E: MergeExecutor + 'static> eframe::App for MergerWindow<E> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.flow.poll();
        let busy = self.flow.is_busy();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading("Resume + Cover Letter");
                ui.label("Pick your resume and cover letter, then where to save the merged PDF.");
                ui.add_space(16.0);

                let label = if busy { "Merging..." } else { "Merge" };
                let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0));
                if ui.add_enabled(!busy, button).clicked() {
                    if self.flow.activate(&mut self.picker) == Activation::Dispatched {
                        ctx.request_repaint();
                    }
                }
                if busy {
                    ui.spinner();
                }
                ui.add_space(16.0);
            });

            self.show_banner(ui);
            self.show_links(ui);
        });

        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Open the window and block until it is closed
pub fn run<E: MergeExecutor + 'static>(window: MergerWindow<E>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([600.0, 400.0])
            .with_min_inner_size([420.0, 280.0]),
        ..Default::default()
    };

    eframe::run_native(WINDOW_TITLE, options, Box::new(move |_cc| Ok(Box::new(window))))
}
