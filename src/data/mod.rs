pub mod manifest;
pub mod sites;

use ahash::AHashMap;
use anyhow::{Context, Result};
use log::{info, warn};
use readcount::{parse_readcount_report, PositionCount, Tissue};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::processing::{feature_columns, normalize_columns, site_features};
use crate::runner::readcount_path;
use manifest::Sample;
use sites::load_sites;

/// The merged, normalized training table. One row per (sample, site); the
/// optional manual-review calls ride alongside and are not feature columns.
pub struct TrainingData {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub calls: Vec<Option<String>>,
}

impl TrainingData {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .fold(0.0_f64, |max, &value| max.max(value))
    }

    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        let outfile = File::create(path_ref)
            .with_context(|| format!("Failed to create file at: {:?}", path_ref))?;
        let mut writer = BufWriter::new(outfile);

        let has_calls = self.calls.iter().any(|call| call.is_some());

        write!(writer, "site")?;
        for column in &self.columns {
            write!(writer, "\t{}", column)?;
        }
        if has_calls {
            write!(writer, "\tcall")?;
        }
        writeln!(writer)?;

        for (row_num, row) in self.rows.iter().enumerate() {
            write!(writer, "{}", self.index[row_num])?;
            for value in row {
                write!(writer, "\t{}", value)?;
            }
            if has_calls {
                write!(writer, "\t{}", self.calls[row_num].as_deref().unwrap_or(""))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

pub fn load_readcount_map<P: AsRef<Path>>(
    path: P,
) -> Result<AHashMap<(String, u64), PositionCount>> {
    let path_ref = path.as_ref();
    let report = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read readcount file: {:?}", path_ref))?;

    let mut positions = AHashMap::new();
    for count in parse_readcount_report(&report)
        .with_context(|| format!("Malformed readcount file: {:?}", path_ref))?
    {
        positions.insert((count.chromosome.clone(), count.position), count);
    }

    Ok(positions)
}

/// Joins the normal and tumor readcounts of every sample into one normalized
/// feature table, one row per site in site-file order.
pub fn assemble_training_data(samples: &[Sample], output_dir: &Path) -> Result<TrainingData> {
    let columns = feature_columns();
    let mut index = Vec::new();
    let mut rows = Vec::new();
    let mut calls = Vec::new();

    for sample in samples {
        let sites = load_sites(&sample.sites)
            .with_context(|| format!("Error loading sites for sample '{}'", sample.sample_name))?;

        let normal =
            load_readcount_map(readcount_path(&sample.sample_name, Tissue::Normal, output_dir))?;
        let tumor =
            load_readcount_map(readcount_path(&sample.sample_name, Tissue::Tumor, output_dir))?;

        for site in &sites {
            let key = (site.chromosome.clone(), site.start);

            let mut row = Vec::with_capacity(columns.len());
            for (tissue, positions) in [(Tissue::Normal, &normal), (Tissue::Tumor, &tumor)] {
                let entry = positions.get(&key);
                if entry.is_none() {
                    warn!(
                        "No {} readcounts for '{}' at {}:{}",
                        tissue, sample.sample_name, site.chromosome, site.start
                    );
                }
                row.extend(site_features(site, entry));
            }

            index.push(format!(
                "{}~{}:{}",
                sample.sample_name, site.chromosome, site.start
            ));
            calls.push(site.call.clone());
            rows.push(row);
        }
    }

    let rows = normalize_columns(rows);
    info!("Assembled training data: {} rows, {} columns", rows.len(), columns.len());

    Ok(TrainingData {
        index,
        columns,
        rows,
        calls,
    })
}
