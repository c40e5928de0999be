mod analysis;
mod app;
mod chart;
mod cli;
mod color;
mod data;
mod state;
mod ui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}
