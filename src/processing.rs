use readcount::{BaseMetrics, PositionCount, Tissue, METRIC_NAMES};

use crate::data::sites::VariantSite;

/// Feature columns per tissue: depth, vaf, ref_fraction, other_bases_count,
/// then the 13 readcount metrics for the reference base and for the variant
/// base.
pub const FEATURES_PER_TISSUE: usize = 4 + 2 * METRIC_NAMES.len();
pub const FEATURE_COUNT: usize = 2 * FEATURES_PER_TISSUE;

pub fn feature_columns() -> Vec<String> {
    let mut columns = Vec::with_capacity(FEATURE_COUNT);

    for tissue in Tissue::BOTH {
        columns.push(format!("{}_depth", tissue));
        columns.push(format!("{}_vaf", tissue));
        columns.push(format!("{}_ref_fraction", tissue));
        columns.push(format!("{}_other_bases_count", tissue));

        for prefix in ["ref", "var"] {
            for name in METRIC_NAMES {
                columns.push(format!("{}_{}_{}", tissue, prefix, name));
            }
        }
    }

    columns
}

/// Engineers the per-tissue feature slice for one site. A site missing from
/// the readcount report (zero coverage) yields an all-zero slice.
pub fn site_features(site: &VariantSite, entry: Option<&PositionCount>) -> Vec<f64> {
    let mut features = Vec::with_capacity(FEATURES_PER_TISSUE);

    let count = match entry {
        Some(count) => count,
        None => {
            features.resize(FEATURES_PER_TISSUE, 0.0);
            return features;
        }
    };

    let depth = count.depth as f64;
    let ref_metrics = count.base(&site.reference_base);
    let var_metrics = count.base(&site.variant_base);

    let ref_count = ref_metrics.map(|metrics| metrics.count).unwrap_or(0);
    let var_count = var_metrics.map(|metrics| metrics.count).unwrap_or(0);

    let (vaf, ref_fraction) = if count.depth > 0 {
        (var_count as f64 / depth, ref_count as f64 / depth)
    } else {
        (0.0, 0.0)
    };
    let other_bases_count = count.depth.saturating_sub(ref_count + var_count) as f64;

    features.push(depth);
    features.push(vaf);
    features.push(ref_fraction);
    features.push(other_bases_count);
    push_base_metrics(&mut features, ref_metrics);
    push_base_metrics(&mut features, var_metrics);

    features
}

fn push_base_metrics(features: &mut Vec<f64>, metrics: Option<&BaseMetrics>) {
    match metrics {
        Some(metrics) => features.extend(metrics.metric_vector()),
        None => features.resize(features.len() + METRIC_NAMES.len(), 0.0),
    }
}

/// Scales every column by its observed maximum so all values land in [0, 1].
/// Columns whose maximum is 0 are left untouched.
pub fn normalize_columns(mut rows: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let n_columns = match rows.first() {
        Some(row) => row.len(),
        None => return rows,
    };

    for column in 0..n_columns {
        let max = rows
            .iter()
            .map(|row| row[column])
            .fold(0.0_f64, f64::max);

        if max > 0.0 {
            for row in rows.iter_mut() {
                row[column] /= max;
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use readcount::parse_readcount_report;

    fn mock_site(reference_base: &str, variant_base: &str) -> VariantSite {
        VariantSite {
            chromosome: "chr21".to_string(),
            start: 10402985,
            stop: 10402985,
            reference_base: reference_base.to_string(),
            variant_base: variant_base.to_string(),
            call: None,
        }
    }

    fn mock_position_count() -> PositionCount {
        let line = "chr21\t10402985\tA\t30\tA:27:58.39:31.79:0.00:14:13:0.47:0.01:29.50:12:0.49:91.25:0.50\tC:2:55.00:29.00:0.00:1:1:0.40:0.02:31.00:1:0.45:88.00:0.48";
        parse_readcount_report(line).unwrap().remove(0)
    }

    #[test]
    fn test_feature_columns_count() {
        let columns = feature_columns();

        assert_eq!(columns.len(), 60);
        assert_eq!(columns[0], "normal_depth");
        assert_eq!(columns[1], "normal_vaf");
        assert_eq!(columns[4], "normal_ref_count");
        assert_eq!(columns[30], "tumor_depth");
        assert_eq!(columns[59], "tumor_var_avg_distance_to_effective_3p_end");
    }

    #[test]
    fn test_site_features() {
        let site = mock_site("A", "C");
        let count = mock_position_count();

        let features = site_features(&site, Some(&count));

        assert_eq!(features.len(), FEATURES_PER_TISSUE);
        assert_eq!(features[0], 30.0); // depth
        assert_eq!(features[1], 2.0 / 30.0); // vaf
        assert_eq!(features[2], 27.0 / 30.0); // ref_fraction
        assert_eq!(features[3], 1.0); // other bases
        assert_eq!(features[4], 27.0); // ref count
        assert_eq!(features[17], 2.0); // var count
    }

    #[test]
    fn test_site_features_missing_entry() {
        let site = mock_site("A", "C");
        let features = site_features(&site, None);

        assert_eq!(features.len(), FEATURES_PER_TISSUE);
        assert!(features.iter().all(|&value| value == 0.0));
    }

    #[test]
    fn test_site_features_variant_base_absent() {
        let site = mock_site("A", "G");
        let count = mock_position_count();

        let features = site_features(&site, Some(&count));

        assert_eq!(features[1], 0.0); // vaf
        assert_eq!(features[3], 3.0); // other bases now include C reads
        assert!(features[17..].iter().all(|&value| value == 0.0));
    }

    #[test]
    fn test_normalize_columns() {
        let rows = vec![vec![10.0, 0.0, 0.5], vec![40.0, 0.0, 0.25]];

        let normalized = normalize_columns(rows);

        assert_eq!(normalized[0], vec![0.25, 0.0, 1.0]);
        assert_eq!(normalized[1], vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_normalize_columns_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(normalize_columns(rows).is_empty());
    }
}
