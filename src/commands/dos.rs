use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use log::{
    info,
    warn,
};

use crate::{
    cli::OptProcess,
    commands::common::{
        SettingsArgs,
        write_array_to_txt,
    },
    dos::{
        BinEdges,
        EnergyWindow,
    },
    gap::BandGap,
    types::Result,
    vasp_parsers::{
        poscar::Composition,
        procar::ElectronicDataset,
    },
};


#[derive(Debug, Args)]
/// Bin the eigenvalues of a uniform-mesh PROCAR into total, element-resolved and
/// orbital-resolved density of states, relative to the VBM.
///
/// Defaults of the energy window come from the settings, see `--gen-template`.
pub struct Dos {
    #[command(flatten)]
    settings: SettingsArgs,

    #[arg(long, default_value = "./PROCAR_DOS")]
    /// PROCAR from a uniform k-mesh.
    procar: PathBuf,

    #[arg(long, default_value = "./CONTCAR")]
    /// POSCAR or CONTCAR holding the element symbols and ion counts.
    poscar: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    /// Lower bound of the energy window, in eV relative to VBM.
    emin: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    /// Upper bound of the energy window, in eV relative to VBM.
    emax: Option<f64>,

    #[arg(long)]
    /// Bin width in eV.
    step: Option<f64>,

    #[arg(long, value_enum, ignore_case = true)]
    /// Treatment of eigenvalues lying exactly on a bin edge.
    bin_edges: Option<BinEdges>,

    #[arg(long, short = 'o', default_value = "dos.txt")]
    /// Write the histograms as columns of a txt file.
    txtout: PathBuf,
}


impl Dos {
    fn window(&self, defaults: EnergyWindow) -> Result<EnergyWindow> {
        Ok(EnergyWindow::new(
            self.emin.unwrap_or(defaults.emin),
            self.emax.unwrap_or(defaults.emax),
            self.step.unwrap_or(defaults.step),
            self.bin_edges.unwrap_or(defaults.bin_edges),
        )?)
    }
}


impl OptProcess for Dos {
    fn process(&self) -> Result<()> {
        let settings = match self.settings.load()? {
            Some(s) => s,
            None => return Ok(()),
        };
        let window = self.window(settings.dos)?;
        if window.nbins() == 0 {
            warn!("Energy window [{}, {}] is empty, the histograms will have no bins.", window.emin, window.emax);
        }

        info!("Reading {:?} ...", self.poscar);
        let composition = Composition::from_file(&self.poscar)
            .with_context(|| format!("Parse file {:?} failed.", self.poscar))?;
        info!("Reading {:?} ...", self.procar);
        let mut dataset = ElectronicDataset::from_file(&self.procar)
            .with_context(|| format!("Parse file {:?} failed.", self.procar))?;

        let gap = BandGap::from_dataset(&dataset)?;
        if gap.is_metal() {
            warn!("Valence and conduction states overlap by {:.3} eV, aligning to the highest occupied state anyway.", -gap.gap);
        }
        info!("Shifting eigenvalues by VBM = {:.4} eV", gap.vbm);
        dataset.shift_energy(gap.vbm);

        let total = dataset.total_dos(&window)?;
        let species = dataset.species_dos(&composition, &window)?;
        let (shells, shell_dos) = dataset.shell_dos(&window)?;

        let mut columns = vec![&total.energy, &total.density];
        columns.extend(species.iter().map(|h| &h.density));
        columns.extend(shell_dos.iter().map(|h| &h.density));

        let header = ["E-VBM(eV)", "total"].into_iter()
            .map(String::from)
            .chain(composition.ion_types().into_iter().map(String::from))
            .chain(shells)
            .collect::<Vec<_>>()
            .join("  ");

        info!("Writing {} bins of {} channels to {:?}", window.nbins(), columns.len() - 1, self.txtout);
        write_array_to_txt(&self.txtout, columns, &header)?;

        Ok(())
    }
}
