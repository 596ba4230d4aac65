use anyhow::{bail, Result};
use std::fmt;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Tissue {
    Normal,
    Tumor,
}

impl Tissue {
    pub const BOTH: [Tissue; 2] = [Tissue::Normal, Tissue::Tumor];

    pub fn from_str(tissue: &str) -> Result<Self> {
        match tissue {
            "normal" => Ok(Tissue::Normal),
            "tumor" => Ok(Tissue::Tumor),
            _ => bail!("Could not parse '{}' to Tissue", tissue),
        }
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let txt = match self {
            Tissue::Normal => "normal",
            Tissue::Tumor => "tumor",
        };
        write!(f, "{}", txt)
    }
}
