mod controller;
mod state;
mod ui;

pub use controller::UploadController;
pub use state::ComparisonState;

use eframe::{egui, App};
use tracing::info;

pub struct FileComparator {
    controller: UploadController,
    server_url: String,
}

impl FileComparator {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        controller: UploadController,
        server_url: String,
    ) -> Self {
        info!(server_url = %server_url, "initializing file comparator");
        Self {
            controller,
            server_url,
        }
    }

    pub fn start_compare(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.controller.start_compare(move || ctx.request_repaint());
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.controller.poll() {
            ctx.request_repaint();
        }
    }
}

impl App for FileComparator {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
