use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;
use log::info;

use hetsched::report::ScheduleSummary;
use hetsched::scheduler::{algorithm_resolver, Scheduler};
use hetsched::stats::{makespan_lower_bound, WorkloadStats};
use hetsched::workload::Workload;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Computes a static schedule for a single workload file
struct Args {
    /// Path to the workload file (.yaml/.yml or plain text)
    workload: PathBuf,

    /// Scheduling algorithm [heft, cpop]
    #[arg(short, long, default_value = "heft")]
    algorithm: String,

    /// Path to the produced report (printed to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();

    let scheduler = algorithm_resolver(&args.algorithm).unwrap_or_else(|| {
        eprintln!("Wrong algorithm {}", args.algorithm);
        std::process::exit(1)
    });

    let workload = Workload::from_file(&args.workload).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1)
    });

    let stats = WorkloadStats::new(&workload);
    info!(
        "workload: {} tasks, {} edges, {} processors",
        stats.task_count, stats.edge_count, stats.processor_count
    );
    info!("makespan lower bound: {:.3}", makespan_lower_bound(&workload));

    let schedule = scheduler.schedule(&workload);
    let summary = ScheduleSummary::new(&schedule);

    let report = if args.json {
        let mut json = summary.to_json();
        json.push('\n');
        json
    } else {
        let mut buffer = Vec::new();
        summary.write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    };

    match args.output {
        Some(path) => std::fs::write(path, report).unwrap_or_else(|e| {
            eprintln!("Can't write report: {}", e);
            std::process::exit(1)
        }),
        None => print!("{}", report),
    }
}
