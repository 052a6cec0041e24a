mod app;
mod corpus;
mod engine;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "ibsen_networks.json")]
    data: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dramatís",
        options,
        Box::new(move |cc| Ok(Box::new(app::DramatisApp::new(cc, args.data.clone())))),
    )
}
