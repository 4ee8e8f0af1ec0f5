use anyhow::Result;
use blbn_report::{
    cli::{Cli, OutputFormat},
    config::ExperimentConfig,
    json_output::JsonReport,
    latex_output,
    report::ReportAggregator,
    samples::SampleLoader,
    text_output,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(args: &Cli) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_toml_file(path)?,
        None => ExperimentConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    tracing::info!(
        results_root = %config.results_root.display(),
        rank_scheme = %config.rank_scheme,
        comparisons = config.comparisons.len(),
        "Starting report"
    );

    let loader = SampleLoader::from_config(&config);
    let reports = ReportAggregator::new(&config, loader).run();

    let output = match args.format {
        OutputFormat::Latex => latex_output::to_latex(&reports),
        OutputFormat::Text => text_output::to_text(&reports),
        OutputFormat::Json => {
            let mut json = JsonReport::new(&reports, config.rank_scheme).to_json()?;
            json.push('\n');
            json
        }
    };
    print!("{}", output);

    Ok(())
}
