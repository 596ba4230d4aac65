use anyhow::{bail, Context, Result};

/// Per-base metric names, in the order bam-readcount emits them after the
/// base itself.
pub const METRIC_NAMES: [&str; 13] = [
    "count",
    "avg_mapping_quality",
    "avg_basequality",
    "avg_se_mapping_quality",
    "num_plus_strand",
    "num_minus_strand",
    "avg_pos_as_fraction",
    "avg_num_mismatches_as_fraction",
    "avg_sum_mismatch_qualities",
    "num_q2_containing_reads",
    "avg_distance_to_q2_start_in_q2_reads",
    "avg_clipped_length",
    "avg_distance_to_effective_3p_end",
];

/// Read support metrics for a single base at a single genomic position.
///
/// One `BaseMetrics` corresponds to one colon-separated entry of a
/// bam-readcount report line: the base (which may be an insertion `+SEQ` or
/// deletion `-SEQ` token) followed by 13 numeric fields.
///
/// # Examples
/// ```
/// use readcount::BaseMetrics;
///
/// let entry = "A:28:58.39:31.79:0.00:14:14:0.47:0.01:29.50:12:0.49:91.25:0.50";
/// let metrics = BaseMetrics::from_field(entry).unwrap();
/// assert_eq!(metrics.base, "A");
/// assert_eq!(metrics.count, 28);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMetrics {
    pub base: String,
    pub count: u32,
    pub avg_mapping_quality: f64,
    pub avg_basequality: f64,
    pub avg_se_mapping_quality: f64,
    pub num_plus_strand: u32,
    pub num_minus_strand: u32,
    pub avg_pos_as_fraction: f64,
    pub avg_num_mismatches_as_fraction: f64,
    pub avg_sum_mismatch_qualities: f64,
    pub num_q2_containing_reads: u32,
    pub avg_distance_to_q2_start_in_q2_reads: f64,
    pub avg_clipped_length: f64,
    pub avg_distance_to_effective_3p_end: f64,
}

impl BaseMetrics {
    /// Parses one base entry of a readcount line.
    ///
    /// # Errors
    /// Returns an error if the entry does not have exactly 14 colon-separated
    /// fields or any numeric field fails to parse.
    pub fn from_field(field: &str) -> Result<Self> {
        let parts: Vec<&str> = field.split(':').collect();

        if parts.len() != 14 {
            bail!(
                "Invalid base entry '{}': expected 14 colon-separated fields, got {}",
                field,
                parts.len()
            );
        }

        let int = |idx: usize| -> Result<u32> {
            parts[idx]
                .parse()
                .with_context(|| format!("Invalid count field '{}' in base entry '{}'", parts[idx], field))
        };
        let float = |idx: usize| -> Result<f64> {
            parts[idx]
                .parse()
                .with_context(|| format!("Invalid numeric field '{}' in base entry '{}'", parts[idx], field))
        };

        Ok(Self {
            base: parts[0].to_string(),
            count: int(1)?,
            avg_mapping_quality: float(2)?,
            avg_basequality: float(3)?,
            avg_se_mapping_quality: float(4)?,
            num_plus_strand: int(5)?,
            num_minus_strand: int(6)?,
            avg_pos_as_fraction: float(7)?,
            avg_num_mismatches_as_fraction: float(8)?,
            avg_sum_mismatch_qualities: float(9)?,
            num_q2_containing_reads: int(10)?,
            avg_distance_to_q2_start_in_q2_reads: float(11)?,
            avg_clipped_length: float(12)?,
            avg_distance_to_effective_3p_end: float(13)?,
        })
    }

    /// The 13 numeric metrics in `METRIC_NAMES` order.
    pub fn metric_vector(&self) -> [f64; 13] {
        [
            self.count as f64,
            self.avg_mapping_quality,
            self.avg_basequality,
            self.avg_se_mapping_quality,
            self.num_plus_strand as f64,
            self.num_minus_strand as f64,
            self.avg_pos_as_fraction,
            self.avg_num_mismatches_as_fraction,
            self.avg_sum_mismatch_qualities,
            self.num_q2_containing_reads as f64,
            self.avg_distance_to_q2_start_in_q2_reads,
            self.avg_clipped_length,
            self.avg_distance_to_effective_3p_end,
        ]
    }
}
