use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::analysis::report::Report;
use crate::analysis::summary::{Preview, Summary};
use crate::data::loader;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Passenger manifest in the 12-column Titanic CSV format
    #[arg(default_value = "titanic_data.csv")]
    input: PathBuf,

    /// Where to write the text report
    #[arg(short, long, default_value = "analysis.txt")]
    output: PathBuf,

    /// Also write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of passengers to preview on the console (0 to skip)
    #[arg(long, default_value_t = 10)]
    head: usize,

    /// Do not open the chart window
    #[arg(long)]
    no_charts: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let manifest = loader::load_file(&args.input)
        .with_context(|| format!("loading manifest {}", args.input.display()))?;
    log::info!(
        "Loaded {} passengers from {}",
        manifest.len(),
        args.input.display()
    );
    if manifest.is_empty() {
        log::warn!("{} has no passenger rows", args.input.display());
    }

    if args.head > 0 {
        print!("{}", Preview::new(&manifest, args.head));
    }
    print!("{}", Summary::build(&manifest));

    let report = Report::build(&manifest);
    std::fs::write(&args.output, report.render())
        .with_context(|| format!("writing report {}", args.output.display()))?;
    println!("Analysis saved to {}", args.output.display());

    if let Some(path) = &args.json {
        let json = report.to_json().context("serializing report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON report {}", path.display()))?;
        log::info!("JSON report saved to {}", path.display());
    }

    if args.no_charts {
        return Ok(());
    }
    crate::app::run(manifest, &args.input)
}
