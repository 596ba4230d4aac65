use clap::Parser;

#[derive(Parser, Debug)]
pub struct PrepareDataArgs {
    #[arg(
        short,
        long,
        required = true,
        help = "Tab-separated sample manifest: sample_name, normal_bam, tumor_bam, sites, reference."
    )]
    pub manifest: String,

    #[arg(long, help = "Set if the manifest has a header row.")]
    pub header: bool,

    #[arg(
        short,
        long,
        required = true,
        help = "Directory for readcount output and the final training table."
    )]
    pub output: String,

    #[arg(
        long,
        default_value = "bam-readcount",
        help = "Read-counting executable to invoke."
    )]
    pub executable: String,

    #[arg(
        long,
        default_value_t = 20,
        help = "Minimum base quality passed to the read-counting tool."
    )]
    pub min_base_quality: u8,
}
