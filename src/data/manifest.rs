use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use readcount::Tissue;
use serde::Deserialize;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// One manifest row. Columns in order: sample name, normal BAM, tumor BAM,
/// variant site file, reference FASTA.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub sample_name: String,
    pub normal_bam: PathBuf,
    pub tumor_bam: PathBuf,
    pub sites: PathBuf,
    pub reference: PathBuf,
}

impl Sample {
    pub fn bam_for(&self, tissue: Tissue) -> &Path {
        match tissue {
            Tissue::Normal => &self.normal_bam,
            Tissue::Tumor => &self.tumor_bam,
        }
    }
}

pub fn parse_samples_file<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Vec<Sample>> {
    let path_ref = path.as_ref();

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(false)
        .from_path(path_ref)
        .with_context(|| format!("Failed to open manifest at: {:?}", path_ref))?;

    let mut samples = Vec::new();
    let mut seen_names = HashSet::new();

    for (line_num, row) in rdr.records().enumerate() {
        let record = row.with_context(|| {
            format!("Malformed manifest row {} in {:?}", line_num + 1, path_ref)
        })?;

        if has_header && line_num == 0 {
            continue;
        }

        let sample: Sample = record.deserialize(None).with_context(|| {
            format!("Malformed manifest row {} in {:?}", line_num + 1, path_ref)
        })?;

        if !seen_names.insert(sample.sample_name.clone()) {
            bail!("Duplicate sample name in manifest: '{}'", sample.sample_name);
        }

        samples.push(sample);
    }

    Ok(samples)
}
