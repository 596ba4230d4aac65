use anyhow::{bail, Context, Result};
use log::info;
use readcount::Tissue;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use crate::data::{
    manifest::Sample,
    sites::{load_sites, write_site_list},
};

/// Capability to count reads for one BAM over a region list, returning the
/// raw report text.
pub trait ReadcountRunner {
    fn run(&self, bam: &Path, reference: &Path, site_list: &Path) -> Result<String>;
}

pub struct BamReadcount {
    executable: String,
    min_base_quality: u8,
}

impl BamReadcount {
    pub fn new(executable: String, min_base_quality: u8) -> Self {
        Self {
            executable,
            min_base_quality,
        }
    }
}

impl ReadcountRunner for BamReadcount {
    fn run(&self, bam: &Path, reference: &Path, site_list: &Path) -> Result<String> {
        let output = Command::new(&self.executable)
            .arg("-i")
            .arg("-w")
            .arg("0")
            .arg("-b")
            .arg(self.min_base_quality.to_string())
            .arg("-f")
            .arg(reference)
            .arg("-l")
            .arg(site_list)
            .arg(bam)
            .output()
            .with_context(|| {
                format!(
                    "Failed to invoke '{}'. Is it installed and on PATH?",
                    self.executable
                )
            })?;

        if !output.status.success() {
            bail!(
                "'{}' exited with {} for {:?}: {}",
                self.executable,
                output.status,
                bam,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("Output of '{}' was not valid UTF8", self.executable))
    }
}

pub fn readcount_path(sample_name: &str, tissue: Tissue, output_dir: &Path) -> PathBuf {
    output_dir
        .join("readcounts")
        .join(format!("{}_{}.readcounts", sample_name, tissue))
}

/// Runs the read-counting tool once per tissue for one sample, writing each
/// raw report to `<output_dir>/readcounts/<sample>_<tissue>.readcounts`.
pub fn run_readcount_tool(
    sample: &Sample,
    output_dir: &Path,
    runner: &dyn ReadcountRunner,
) -> Result<Vec<PathBuf>> {
    let readcount_dir = output_dir.join("readcounts");
    fs::create_dir_all(&readcount_dir)
        .with_context(|| format!("Could not create readcount directory: {:?}", readcount_dir))?;

    let sites = load_sites(&sample.sites)
        .with_context(|| format!("Error loading sites for sample '{}'", sample.sample_name))?;

    let site_list = readcount_dir.join(format!("{}.site_list", sample.sample_name));
    write_site_list(&sites, &site_list)?;

    let mut outputs = Vec::new();

    for tissue in Tissue::BOTH {
        let report = runner
            .run(sample.bam_for(tissue), &sample.reference, &site_list)
            .with_context(|| {
                format!(
                    "Read counting failed for sample '{}' ({})",
                    sample.sample_name, tissue
                )
            })?;

        let outpath = readcount_path(&sample.sample_name, tissue, output_dir);
        fs::write(&outpath, report)
            .with_context(|| format!("Failed to write readcounts to: {:?}", outpath))?;

        info!(
            "Wrote readcounts for '{}' ({}) to {:?}",
            sample.sample_name, tissue, outpath
        );
        outputs.push(outpath);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::tempdir;

    struct FakeReadcount;

    impl ReadcountRunner for FakeReadcount {
        fn run(&self, _bam: &Path, _reference: &Path, site_list: &Path) -> Result<String> {
            let regions = fs::read_to_string(site_list)?;
            let mut report = String::new();

            for line in regions.lines() {
                let fields: Vec<&str> = line.split('\t').collect();
                report.push_str(&format!(
                    "{}\t{}\tA\t10\tA:8:60.00:32.00:0.00:4:4:0.50:0.01:30.00:4:0.50:90.00:0.50\tC:2:55.00:30.00:0.00:1:1:0.40:0.02:28.00:1:0.45:88.00:0.48\n",
                    fields[0], fields[1]
                ));
            }

            Ok(report)
        }
    }

    struct FailingReadcount;

    impl ReadcountRunner for FailingReadcount {
        fn run(&self, _bam: &Path, _reference: &Path, _site_list: &Path) -> Result<String> {
            anyhow::bail!("simulated tool failure")
        }
    }

    fn mock_sample(dir: &Path) -> Result<Sample> {
        let site_path = dir.join("tst1.review.tsv");
        let mut site_file = fs::File::create(&site_path)?;
        writeln!(site_file, "chr21\t10402985\t10402985\tA\tC")?;
        writeln!(site_file, "chr21\t10403002\t10403002\tG\tT")?;

        Ok(Sample {
            sample_name: "tst1".to_string(),
            normal_bam: dir.join("tst1_normal.bam"),
            tumor_bam: dir.join("tst1_tumor.bam"),
            sites: site_path,
            reference: dir.join("ref.fa"),
        })
    }

    #[test]
    fn test_run_readcount_tool_writes_both_tissues() -> Result<()> {
        let dir = tempdir()?;
        let sample = mock_sample(dir.path())?;

        let outputs = run_readcount_tool(&sample, dir.path(), &FakeReadcount)?;

        assert_eq!(outputs.len(), 2);
        assert_eq!(
            outputs[0],
            dir.path().join("readcounts").join("tst1_normal.readcounts")
        );
        assert_eq!(
            outputs[1],
            dir.path().join("readcounts").join("tst1_tumor.readcounts")
        );

        for outpath in outputs {
            let written = fs::read_to_string(outpath)?;
            assert_eq!(written.lines().count(), 2);
        }

        Ok(())
    }

    #[test]
    fn test_run_readcount_tool_failure_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let sample = mock_sample(dir.path())?;

        let result = run_readcount_tool(&sample, dir.path(), &FailingReadcount);
        assert!(result.is_err());

        Ok(())
    }

    #[test]
    fn test_bam_readcount_missing_executable() {
        let runner = BamReadcount::new("definitely-not-bam-readcount".to_string(), 20);
        let result = runner.run(
            Path::new("a.bam"),
            Path::new("ref.fa"),
            Path::new("sites.txt"),
        );
        assert!(result.is_err());
    }
}
