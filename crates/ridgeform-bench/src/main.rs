use std::path::PathBuf;
use std::process;

use ridgeform_bench::report;
use ridgeform_bench::runner::BenchmarkRunner;
use ridgeform_bench::scenes;
use ridgeform_bench::DEFAULT_CONFIG_RON;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut snapshot_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut stroke_count = 60u32;
    let mut max_divisions = 1024u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => baseline_path = Some(PathBuf::from(next_arg(&args, &mut i))),
            "--output" => output_path = Some(PathBuf::from(next_arg(&args, &mut i))),
            "--config" => config_path = Some(PathBuf::from(next_arg(&args, &mut i))),
            "--snapshot" => snapshot_path = Some(PathBuf::from(next_arg(&args, &mut i))),
            "--regression-threshold" => {
                regression_threshold = parse_arg(&args, &mut i, "--regression-threshold")
            }
            "--strokes" => stroke_count = parse_arg(&args, &mut i, "--strokes"),
            "--max-divisions" => max_divisions = parse_arg(&args, &mut i, "--max-divisions"),
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --config <path>                Terrain config RON (default: data/terrain.ron)");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --strokes <n>                  Brush strokes per scene (default: 60)");
                eprintln!("  --max-divisions <n>            Skip scenes larger than this (default: 1024)");
                eprintln!("  --snapshot <path>              Write the last scene's terrain snapshot");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config_text = match &config_path {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => DEFAULT_CONFIG_RON.to_string(),
    };
    let base = ridgeform_core::load_config_from_str(&config_text).unwrap_or_else(|e| {
        eprintln!("Invalid terrain config: {}", e);
        process::exit(1);
    });

    let runner = BenchmarkRunner::new(base);
    let mut results = Vec::new();
    let mut last_terrain = None;

    for scene in scenes::standard_scenes(stroke_count)
        .iter()
        .filter(|s| s.divisions <= max_divisions)
    {
        match runner.run_scene(scene) {
            Ok((result, terrain)) => {
                results.push(result);
                last_terrain = Some(terrain);
            }
            Err(e) => {
                log::error!("Scene '{}' failed: {}", scene.name, e);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let (Some(path), Some(terrain)) = (&snapshot_path, &last_terrain) {
        let bytes = ridgeform_persist::save(terrain);
        if let Err(e) = std::fs::write(path, &bytes) {
            log::error!("Failed to write snapshot {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved terrain snapshot to {} ({} bytes)", path.display(), bytes.len());
    }

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_label(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("Failed to save baseline {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline
    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

fn next_arg<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let value = next_arg(args, i);
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, value);
        process::exit(1);
    })
}

/// Label for a baseline run, unique per process.
fn run_label() -> String {
    format!("bench-{}", std::process::id())
}
