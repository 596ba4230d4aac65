use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// One manually reviewed variant position. Coordinates are 1-based; the
/// variant base may be an insertion (`+SEQ`) or deletion (`-SEQ`) token.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSite {
    pub chromosome: String,
    pub start: u64,
    pub stop: u64,
    pub reference_base: String,
    pub variant_base: String,
    pub call: Option<String>,
}

pub fn load_sites<P: AsRef<Path>>(path: P) -> Result<Vec<VariantSite>> {
    let path_ref = path.as_ref();

    // flexible: the trailing call column is optional
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path_ref)
        .with_context(|| format!("Failed to open site file at: {:?}", path_ref))?;

    let mut sites = Vec::new();

    for (line_num, row) in rdr.records().enumerate() {
        let record =
            row.with_context(|| format!("Malformed site row {} in {:?}", line_num + 1, path_ref))?;

        let chromosome = record
            .get(0)
            .ok_or_else(|| anyhow!("Missing chromosome at site row {}", line_num + 1))?
            .to_string();

        let start_str = record
            .get(1)
            .ok_or_else(|| anyhow!("Missing start at site row {}", line_num + 1))?;
        let start: u64 = start_str
            .parse()
            .with_context(|| format!("Invalid start '{}' at site row {}", start_str, line_num + 1))?;

        let stop_str = record
            .get(2)
            .ok_or_else(|| anyhow!("Missing stop at site row {}", line_num + 1))?;
        let stop: u64 = stop_str
            .parse()
            .with_context(|| format!("Invalid stop '{}' at site row {}", stop_str, line_num + 1))?;

        let reference_base = record
            .get(3)
            .ok_or_else(|| anyhow!("Missing reference base at site row {}", line_num + 1))?
            .to_string();

        let variant_base = record
            .get(4)
            .ok_or_else(|| anyhow!("Missing variant base at site row {}", line_num + 1))?
            .to_string();

        let call = record.get(5).map(|call| call.to_string());

        sites.push(VariantSite {
            chromosome,
            start,
            stop,
            reference_base,
            variant_base,
            call,
        });
    }

    Ok(sites)
}

/// Writes the 3-column region list consumed by the read-counting tool.
pub fn write_site_list<P: AsRef<Path>>(sites: &[VariantSite], path: P) -> Result<()> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref)
        .with_context(|| format!("Failed to create site list at: {:?}", path_ref))?;
    let mut writer = BufWriter::new(file);

    for site in sites {
        writeln!(writer, "{}\t{}\t{}", site.chromosome, site.start, site.stop)?;
    }

    writer.flush()?;
    Ok(())
}
