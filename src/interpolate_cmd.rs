//! Interpolate command: gauge CSVs to a classified precipitation map.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use rainmap_io::{accumulate, read_measurements, read_sites, render_png, write_records_csv};
use rainmap_pipeline::run_pipeline;

use crate::cli::InterpolateArgs;
use crate::config::RainmapConfig;
use crate::convert;

/// Run the ingest, interpolate, classify and render pipeline.
pub fn run(args: InterpolateArgs) -> Result<()> {
    let _cmd = info_span!("interpolate").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: RainmapConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Resolve paths, CLI flags first
    let sites_path = args
        .sites
        .or(config.io.sites.clone())
        .ok_or_else(|| anyhow::anyhow!("no sites path: set [io].sites in config or use --sites"))?;
    let measurements_path = args
        .measurements
        .or(config.io.measurements.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no measurements path: set [io].measurements in config or use --measurements"
            )
        })?;
    let output = args.output.or(config.io.output.clone()).ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].output in config or use --output")
    })?;
    let records_path = args.records.or(config.io.records_csv.clone());

    // 3. Build configs from TOML
    let ingest_cfg = convert::build_ingest_config(&config.ingest)?;
    let bounds = convert::build_bounds(&config.region)?;
    let pipeline_cfg = convert::build_pipeline_config(&config.idw)?;
    let classifier = convert::build_classifier(&config.classes)?;
    let render_cfg = convert::build_render_config(&config.render);

    // 4. Read and accumulate gauge data
    info!(path = %sites_path.display(), "reading sites");
    let sites = read_sites(&sites_path, &ingest_cfg)
        .with_context(|| format!("failed to read sites: {}", sites_path.display()))?;
    info!(path = %measurements_path.display(), "reading measurements");
    let measurements = read_measurements(&measurements_path, &ingest_cfg).with_context(|| {
        format!(
            "failed to read measurements: {}",
            measurements_path.display()
        )
    })?;
    let samples = accumulate(&sites, &measurements, &ingest_cfg)
        .context("failed to accumulate measurements")?;

    if samples.is_empty() {
        bail!("no located site reported a measurement in the accumulation window");
    }
    let n_outside = samples
        .coords()
        .iter()
        .filter(|&&c| !bounds.contains(c))
        .count();
    if n_outside > 0 {
        warn!(n_outside, "samples lie outside the map region");
    }

    // 5. Interpolate and classify
    let result = run_pipeline(
        &samples,
        &bounds,
        config.region.resolution,
        &classifier,
        &pipeline_cfg,
    )
    .context("interpolation failed")?;
    info!(
        n_points = result.records().len(),
        n_degenerate = result.n_degenerate(),
        "surface complete"
    );

    // 6. Write outputs
    render_png(
        &output,
        &result,
        classifier.labels(),
        &bounds,
        &samples.coords(),
        &render_cfg,
    )
        .with_context(|| format!("failed to write map: {}", output.display()))?;
    if let Some(path) = records_path {
        write_records_csv(&path, &result)
            .with_context(|| format!("failed to write records: {}", path.display()))?;
    }

    if let Some(window) = result.window() {
        println!("Inches of rain received from {window}");
    }
    for (label, count) in classifier.labels().iter().zip(class_counts(&result, &classifier)) {
        println!("{label:>10}  {count}");
    }

    Ok(())
}

/// Grid points per class, class 1 first.
fn class_counts(
    result: &rainmap_pipeline::InterpolationResult,
    classifier: &rainmap_classify::Classifier,
) -> Vec<usize> {
    let mut counts = vec![0; classifier.n_classes()];
    for r in result.records() {
        if let Some(c) = counts.get_mut(usize::from(r.class).saturating_sub(1)) {
            *c += 1;
        }
    }
    counts
}
