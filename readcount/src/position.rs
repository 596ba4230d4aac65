use anyhow::{bail, Context, Result};

use crate::BaseMetrics;

/// One line of a readcount report: every base observed at a genomic position
/// together with its read support metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCount {
    pub chromosome: String,
    pub position: u64,
    pub reference_base: String,
    pub depth: u32,
    base_counts: Vec<BaseMetrics>,
}

impl PositionCount {
    pub fn from_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < 4 {
            bail!(
                "Invalid readcount line '{}': expected at least 4 tab-separated fields, got {}",
                line,
                fields.len()
            );
        }

        let chromosome = fields[0].to_string();
        let position: u64 = fields[1]
            .parse()
            .with_context(|| format!("Invalid position '{}' in readcount line", fields[1]))?;
        let reference_base = fields[2].to_string();
        let depth: u32 = fields[3]
            .parse()
            .with_context(|| format!("Invalid depth '{}' in readcount line", fields[3]))?;

        let base_counts = fields[4..]
            .iter()
            .map(|field| BaseMetrics::from_field(field))
            .collect::<Result<Vec<BaseMetrics>>>()?;

        Ok(Self {
            chromosome,
            position,
            reference_base,
            depth,
            base_counts,
        })
    }

    pub fn base(&self, base: &str) -> Option<&BaseMetrics> {
        self.base_counts.iter().find(|metrics| metrics.base == base)
    }

    pub fn bases(&self) -> &[BaseMetrics] {
        &self.base_counts
    }
}
