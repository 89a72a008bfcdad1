use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use log::info;

use crate::{
    cli::OptProcess,
    commands::common::gap_summary,
    gap::BandGap,
    types::Result,
    vasp_parsers::procar::ElectronicDataset,
};


#[derive(Debug, Args)]
/// Find the band gap and print the positions of VBM and CBM.
///
/// States with occupation above 0.01 are counted as valence states.
pub struct Gap {
    #[arg(default_value = "./PROCAR_DOS")]
    /// PROCAR file name, preferably from a uniform k-mesh.
    procar: PathBuf,
}


impl OptProcess for Gap {
    fn process(&self) -> Result<()> {
        info!("Reading {:?} ...", self.procar);
        let dataset = ElectronicDataset::from_file(&self.procar)
            .with_context(|| format!("Parse file {:?} failed.", self.procar))?;
        let gap = BandGap::from_dataset(&dataset)?;

        println!("{}", gap_summary(&gap, dataset.coordinates()));
        Ok(())
    }
}
