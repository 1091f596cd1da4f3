use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// A metric that got slower than the baseline allows.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene: String,
    pub metric: &'static str,
    pub pct_change: f64,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't exist.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Compare current results against a baseline on build time and mean stroke time.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    let mut regressions = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };
        let metrics = [
            ("build", result.build_ms(), base.build_ms()),
            ("stroke", result.strokes.mean_ms, base.strokes.mean_ms),
        ];
        for (metric, now, before) in metrics {
            if before <= 0.0 {
                continue;
            }
            let pct_change = (now - before) / before * 100.0;
            if pct_change > threshold_pct {
                regressions.push(Regression {
                    scene: result.scene_name.clone(),
                    metric,
                    pct_change,
                });
            }
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Vertices | Generate (ms) | Mesh (ms) | Colorize (ms) | Pick mean (ms) | Stroke mean (ms) | Stroke P95 (ms) | Max height |\n");
    out.push_str("|-------|----------|---------------|-----------|---------------|----------------|------------------|-----------------|------------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.3} | {:.3} | {:.3} | {:.2} |\n",
            r.scene_name,
            r.vertex_count,
            r.generate_ms,
            r.mesh_ms,
            r.colorize_ms,
            r.picks.mean_ms,
            r.strokes.mean_ms,
            r.strokes.p95_ms,
            r.max_height,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for r in regressions {
        out.push_str(&format!("  - {} {}: +{:.1}%\n", r.scene, r.metric, r.pct_change));
    }
    out
}
