use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;

use hetsched::experiment::Experiment;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Runs a batch of scheduling experiments
struct Args {
    /// Path to YAML file with experiment configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Path to produced JSON file with experiment results
    /// (default - <config>-results.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of threads to use (default - use all available cores)
    #[arg(short, long, default_value_t = std::thread::available_parallelism().unwrap().get())]
    threads: usize,
}

fn main() -> std::io::Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();

    let experiment = Experiment::load(&args.config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1)
    });

    let run_count = experiment.len();
    let output = args.output.unwrap_or_else(|| {
        args.config
            .with_file_name(format!(
                "{}-results",
                args.config.file_stem().unwrap().to_str().unwrap()
            ))
            .with_extension("json")
    });

    let results = experiment.run(args.threads);

    std::fs::File::create(&output)?.write_all(serde_json::to_string_pretty(&results).unwrap().as_bytes())?;
    println!("{} runs finished, results saved to {}", run_count, output.display());
    Ok(())
}
