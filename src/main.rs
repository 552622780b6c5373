use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use callsight::{
    diarization_token_from_env, load_result_file, write_result_json, ClusteringDiarizer,
    HumanReport, InferenceClient, InferenceConfig, KeywordIntentClassifier, Pipeline,
    PipelineError, PrimaryDiarizer, TieredDiarizer,
};

#[derive(Parser)]
#[command(name = "callsight")]
#[command(author, version, about = "Voice-call analysis pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline on a recorded call
    Analyze {
        /// Input audio file (wav/mp3/m4a/flac)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the analysis record (JSON)
        #[arg(short, long, default_value = "analysis_result.json")]
        output: PathBuf,

        /// Optional output file for the human-readable report (text)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Base URL of the inference service (overrides CALLSIGHT_INFERENCE_URL)
        #[arg(long)]
        inference_url: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a previously written analysis record as a report
    Report {
        /// Input analysis record (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            report,
            inference_url,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_call(input, output, report, inference_url).await
        }
        Commands::Report { input, verbose } => {
            setup_logging(verbose);
            render_report(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn analyze_call(
    input: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
    inference_url: Option<String>,
) -> Result<()> {
    let config = match inference_url {
        Some(url) => InferenceConfig::new(url, diarization_token_from_env()),
        None => InferenceConfig::from_env()?,
    };

    if config.auth_token.is_none() {
        info!("no diarization credential set, using the clustering diarizer");
    }

    let client = InferenceClient::new(config);
    let diarizer = TieredDiarizer::new(
        client
            .has_auth_token()
            .then(|| PrimaryDiarizer::new(client.clone())),
        ClusteringDiarizer::new(client.clone()),
    );
    let pipeline = Pipeline::new(
        client.clone(),
        diarizer,
        client.clone(),
        client,
        KeywordIntentClassifier,
    );

    info!("Analyzing {:?}", input);
    let result = match pipeline.run(&input).await {
        Ok(result) => result,
        Err(e) => {
            error!("pipeline failed: {e}");
            if let PipelineError::Step { status, .. } = &e {
                for state in status.steps() {
                    error!("  {}: {}", state.step, state.status);
                }
            }
            return Err(e.into());
        }
    };

    write_result_json(&result, &output).context("Failed to write analysis record")?;
    info!("Analysis record written to {:?}", output);

    if let Some(report_path) = report {
        HumanReport::new(&result)
            .write_file(&report_path)
            .context("Failed to write report")?;
        info!("Report written to {:?}", report_path);
    }

    info!(
        "Complete: {} speakers, language {}, resolved={}",
        result.per_speaker.len(),
        result.language,
        result.resolved
    );

    Ok(())
}

fn render_report(input: PathBuf) -> Result<()> {
    let result = load_result_file(&input).context("Failed to load analysis record")?;
    print!("{}", HumanReport::new(&result).format());
    Ok(())
}
