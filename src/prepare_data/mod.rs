use anyhow::{Context, Result};
use humantime::format_duration;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::{fs, path::Path, time::Instant};

use crate::data::{assemble_training_data, manifest::parse_samples_file, manifest::Sample, TrainingData};
use crate::runner::{run_readcount_tool, BamReadcount, ReadcountRunner};

pub mod args;

pub use args::PrepareDataArgs;

/// The full preparation pipeline: manifest -> readcounts -> training table.
pub struct PrepareData {
    pub samples: Vec<Sample>,
    pub training_data: TrainingData,
}

impl PrepareData {
    pub fn new(
        manifest: &Path,
        has_header: bool,
        output_dir: &Path,
        runner: &dyn ReadcountRunner,
    ) -> Result<Self> {
        let samples = parse_samples_file(manifest, has_header)?;
        info!("Parsed {} samples from manifest", samples.len());

        let pb = ProgressBar::new(samples.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
        );

        for sample in &samples {
            run_readcount_tool(sample, output_dir, runner)?;
            pb.inc(1);
        }
        pb.finish_with_message("Finished running readcounts for all samples.");

        let training_data = assemble_training_data(&samples, output_dir)?;

        Ok(Self {
            samples,
            training_data,
        })
    }
}

pub fn prepare_data(args: PrepareDataArgs) -> Result<()> {
    info!("Running varprep 'prepare-data'");
    let start = Instant::now();

    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Could not create output directory: {:?}", output_dir))?;

    let runner = BamReadcount::new(args.executable, args.min_base_quality);

    let prepared = PrepareData::new(Path::new(&args.manifest), args.header, output_dir, &runner)?;

    let outpath = output_dir.join("training_data.tsv");
    prepared.training_data.write_tsv(&outpath)?;
    info!(
        "Wrote {} rows and {} feature columns to {:?}",
        prepared.training_data.len(),
        prepared.training_data.columns.len(),
        outpath
    );

    info!("prepare-data took: {}", format_duration(start.elapsed()));

    Ok(())
}
