mod app;
mod layout;
mod ontology;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the ontology tree JSON document.
    #[arg(long, default_value = "ontology_tree.json")]
    tree: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ontology-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::OntologyAtlasApp::new(cc, args.tree.clone())))),
    )
}
