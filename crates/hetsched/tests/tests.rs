use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use rand::prelude::*;
use rand_pcg::Pcg64;

use hetsched::experiment::Experiment;
use hetsched::report::ScheduleSummary;
use hetsched::schedule::Schedule;
use hetsched::scheduler::{algorithm_resolver, Scheduler};
use hetsched::schedulers::common::communication_cost;
use hetsched::schedulers::cpop::CpopScheduler;
use hetsched::schedulers::heft::HeftScheduler;
use hetsched::stats::makespan_lower_bound;
use hetsched::workload::{Workload, WorkloadBuilder};

const EPSILON: f64 = 1e-9;

fn gen_workload(rng: &mut Pcg64, num_tasks: usize, num_processors: usize, extra_edges: usize) -> Workload {
    let mut builder = WorkloadBuilder::new(num_processors);
    let mut costs = vec![0.; num_processors];
    for _ in 0..num_tasks {
        for cost in costs.iter_mut() {
            *cost = rng.gen_range(1.0..100.0);
        }
        builder.add_task(&costs);
    }

    // the backbone chain keeps the graph connected with a single entry and exit
    let mut edges = HashSet::new();
    for task in 0..num_tasks - 1 {
        edges.insert((task, task + 1));
        builder.add_edge(task, task + 1, rng.gen_range(0.0..1000.0));
    }
    let mut added = 0;
    while added < extra_edges {
        let from = rng.gen_range(0..num_tasks - 1);
        let to = rng.gen_range(from + 1..num_tasks);
        if edges.insert((from, to)) {
            builder.add_edge(from, to, rng.gen_range(0.0..1000.0));
            added += 1;
        }
    }

    for from in 0..num_processors {
        for to in from + 1..num_processors {
            builder.add_link(from, to, rng.gen_range(1.0..100.0));
        }
    }
    builder.build().unwrap()
}

fn assert_valid_schedule(workload: &Workload, schedule: &Schedule) {
    for task in 0..workload.task_count() {
        let entry = schedule.entry(task);
        let processor = entry.processor.unwrap();
        assert!(entry.start >= 0.);
        assert_eq!(entry.finish, entry.start + workload.execution_cost(task, processor));
        for &pred in workload.predecessors(task) {
            let pred_entry = schedule.entry(pred);
            let arrival = pred_entry.finish
                + communication_cost(workload, pred, task, pred_entry.processor.unwrap(), processor);
            assert!(
                entry.start >= arrival,
                "task {} starts at {} before its input from task {} arrives at {}",
                task,
                entry.start,
                pred,
                arrival
            );
        }
    }

    let mut windows = vec![Vec::new(); workload.processor_count()];
    for task in 0..workload.task_count() {
        let entry = schedule.entry(task);
        windows[entry.processor.unwrap()].push((entry.start, entry.finish));
    }
    for processor_windows in windows.iter_mut() {
        processor_windows.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in processor_windows.windows(2) {
            assert!(pair[1].0 >= pair[0].1, "execution windows overlap");
        }
        let busy: f64 = processor_windows.iter().map(|(start, finish)| finish - start).sum();
        assert!(schedule.makespan() >= busy - EPSILON);
    }

    assert!(schedule.makespan() >= makespan_lower_bound(workload) - EPSILON);
}

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hetsched-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn heft_random_workloads() {
    let mut rng = Pcg64::seed_from_u64(1);
    for (num_tasks, num_processors, extra_edges) in [(10, 3, 15), (50, 5, 100), (200, 8, 400)] {
        let workload = gen_workload(&mut rng, num_tasks, num_processors, extra_edges);
        let schedule = HeftScheduler::new().schedule(&workload);
        assert_valid_schedule(&workload, &schedule);
    }
}

#[test]
fn cpop_random_workloads() {
    let mut rng = Pcg64::seed_from_u64(2);
    for (num_tasks, num_processors, extra_edges) in [(10, 3, 15), (50, 5, 100), (200, 8, 400)] {
        let workload = gen_workload(&mut rng, num_tasks, num_processors, extra_edges);
        let schedule = CpopScheduler::new().schedule(&workload);
        assert_valid_schedule(&workload, &schedule);
    }
}

#[test]
fn schedulers_are_deterministic() {
    let mut rng = Pcg64::seed_from_u64(7);
    let workload = gen_workload(&mut rng, 64, 4, 120);
    for algorithm in ["heft", "cpop"] {
        let scheduler = algorithm_resolver(algorithm).unwrap();
        let first = scheduler.schedule(&workload);
        let second = scheduler.schedule(&workload);
        assert_eq!(first.entries(), second.entries());
    }

    // both processors total 0.6 for the critical path here, a near tie that
    // is only broken by float rounding
    let mut builder = WorkloadBuilder::new(2);
    builder.add_task(&[0.1, 0.6]);
    builder.add_task(&[0.2, 0.0]);
    builder.add_task(&[0.3, 0.0]);
    builder.add_edge(0, 1, 0.);
    builder.add_edge(1, 2, 0.);
    builder.add_link(0, 1, 1.);
    let workload = builder.build().unwrap();

    let scheduler = CpopScheduler::new();
    let first = scheduler.schedule(&workload);
    assert_eq!(first.entry(0).processor, Some(1));
    assert_eq!(first.makespan(), 0.6);
    for _ in 0..100 {
        assert_eq!(scheduler.schedule(&workload).entries(), first.entries());
    }
}

#[test]
fn classic_graph_from_text_file() {
    let dir = test_dir("classic");
    let path = dir.join("classic.txt");
    fs::write(
        &path,
        "10 15 3\n\
         1 2 18\n1 3 12\n1 4 9\n1 5 11\n1 6 14\n\
         2 8 19\n2 9 16\n3 7 23\n4 8 27\n4 9 23\n\
         5 9 13\n6 8 15\n7 10 17\n8 10 11\n9 10 13\n\
         14 16 9\n13 19 18\n11 13 19\n13 8 17\n12 13 10\n\
         13 16 9\n7 15 11\n5 11 14\n18 12 20\n21 7 16\n\
         1 2 1\n1 3 1\n2 3 1\n",
    )
    .unwrap();

    let workload = Workload::from_file(&path).unwrap();
    assert_eq!(workload.task_count(), 10);
    assert_eq!(workload.processor_count(), 3);

    let schedule = CpopScheduler::new().schedule(&workload);
    // the critical path tasks share the processor with the fastest path total
    for task in [0, 1, 8, 9] {
        assert_eq!(schedule.entry(task).processor, Some(1));
    }
    assert_valid_schedule(&workload, &schedule);

    let schedule = HeftScheduler::new().schedule(&workload);
    assert_valid_schedule(&workload, &schedule);

    let report_path = dir.join("schedule.txt");
    ScheduleSummary::new(&schedule).save_to_file(&report_path).unwrap();
    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with("task 1: "));
    assert!(report.ends_with(&format!("makespan: {:.2}\n", schedule.makespan())));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn experiment_end_to_end() {
    let dir = test_dir("experiment");
    let chain_path = dir.join("chain.txt");
    fs::write(&chain_path, "2 1 2\n1 2 0\n1 2\n2 1\n1 2 1\n").unwrap();
    let diamond_path = dir.join("diamond.yaml");
    fs::write(
        &diamond_path,
        "execution_costs:
  - [2, 3]
  - [3, 2]
  - [4, 3]
  - [2, 2]
edges:
  - {from: 1, to: 2, bytes: 2}
  - {from: 1, to: 3, bytes: 2}
  - {from: 2, to: 4, bytes: 2}
  - {from: 3, to: 4, bytes: 2}
links:
  - {from: 1, to: 2, rate: 2}
",
    )
    .unwrap();

    let config_path = dir.join("experiment.yaml");
    let config = format!(
        "workloads:\n  - {}\n  - {}\nalgorithms:\n  - heft\n  - cpop\n",
        chain_path.display(),
        diamond_path.display()
    );
    fs::write(&config_path, config).unwrap();

    let experiment = Experiment::load(&config_path).unwrap();
    assert_eq!(experiment.len(), 4);
    assert!(!experiment.is_empty());
    let results = experiment.run(2);
    assert_eq!(results.len(), 4);
    for pair in results.windows(2) {
        assert!(pair[0].makespan <= pair[1].makespan);
    }
    for result in results.iter() {
        let path = if result.workload == "chain.txt" {
            &chain_path
        } else {
            &diamond_path
        };
        let workload = Workload::from_file(path).unwrap();
        let scheduler = algorithm_resolver(&result.algorithm).unwrap();
        assert_eq!(scheduler.schedule(&workload).makespan(), result.makespan);
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn experiment_config_errors() {
    let dir = test_dir("experiment-errors");
    let config_path = dir.join("experiment.yaml");
    fs::write(&config_path, "workloads: []\nalgorithms: [fastest]\n").unwrap();
    assert!(Experiment::load(&config_path).is_err());

    fs::write(&config_path, "workloads: [missing.txt]\nalgorithms: [heft]\n").unwrap();
    assert!(Experiment::load(&config_path).is_err());

    fs::remove_dir_all(&dir).unwrap();
}
