use anyhow::Result;

mod metrics;
mod position;
mod tissue;

pub use metrics::{BaseMetrics, METRIC_NAMES};
pub use position::PositionCount;
pub use tissue::Tissue;

pub fn parse_readcount_report(report: &str) -> Result<Vec<PositionCount>> {
    report
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(PositionCount::from_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_readcount_report() {
        let report_lines = vec![
            "chr21\t10402985\tA\t30\t=:0:0.00:0.00:0.00:0:0:0.00:0.00:0.00:0:0.00:0.00:0.00\tA:28:58.39:31.79:0.00:14:14:0.47:0.01:29.50:12:0.49:91.25:0.50\tC:2:55.00:29.00:0.00:1:1:0.40:0.02:31.00:1:0.45:88.00:0.48",
            "",
            "chr21\t10403002\tG\t25\t=:0:0.00:0.00:0.00:0:0:0.00:0.00:0.00:0:0.00:0.00:0.00\tG:25:60.00:33.10:0.00:13:12:0.51:0.01:28.75:11:0.50:92.00:0.52",
        ];

        let counts = parse_readcount_report(&report_lines.join("\n")).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].chromosome, "chr21");
        assert_eq!(counts[0].position, 10402985);
        assert_eq!(counts[1].depth, 25);
    }

    #[test]
    fn test_parse_readcount_report_malformed_line() {
        let report = "chr21\tnot_a_position\tA\t30";
        assert!(parse_readcount_report(report).is_err());
    }
}
