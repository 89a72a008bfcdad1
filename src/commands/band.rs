use std::{
    fs,
    path::PathBuf,
};

use anyhow::Context;
use clap::Args;
use log::{
    info,
    warn,
};
use serde::Serialize;

use crate::{
    cli::OptProcess,
    commands::common::{
        gap_summary,
        write_array_to_txt,
    },
    contrib::Contributions,
    session::{
        Session,
        SessionFiles,
    },
    types::{
        Result,
        Vector,
    },
};


#[derive(Debug, Args)]
/// Collect the band structure of a band-path calculation, aligned to the VBM of a
/// uniform-mesh calculation.
///
/// The directory should hold CONTCAR, PROCAR_band, PROCAR_DOS, the KPOINTS the band
/// calculation ran with and the POINTS.json written by `rsbands kpath`.
pub struct Band {
    #[arg(default_value = ".")]
    /// Directory of the calculation.
    dir: PathBuf,

    #[arg(long, short = 'o', default_value = "band.txt")]
    /// Write the k-point positions and band energies as columns of a txt file.
    txtout: PathBuf,

    #[arg(long, default_value = "band.json")]
    /// Write eigenvalues, ticks and color weights as JSON.
    jsonout: PathBuf,
}


#[derive(Serialize)]
struct TickRecord<'a> {
    label:    &'a str,
    distance: f64,
}


#[derive(Serialize)]
struct ColorRecord<'a> {
    labels: &'a [String],
    /// `[iband][ikpoint]` of RGB triplets.
    rgb:    Vec<Vec<[f64; 3]>>,
}


#[derive(Serialize)]
struct BandRecord<'a> {
    vbm:      f64,
    cbm:      f64,
    gap:      f64,
    kpoints:  Vec<f64>,
    /// `[iband][ikpoint]`, relative to VBM.
    energy:   Vec<Vec<f64>>,
    ticks:    Vec<TickRecord<'a>>,
    species:  Option<ColorRecord<'a>>,
    orbitals: Option<ColorRecord<'a>>,
}


impl<'a> ColorRecord<'a> {
    fn new(c: &'a Contributions) -> Self {
        let rgb = c.rgb();
        let (nbands, nkpoints, _) = rgb.dim();
        let rgb = (0 .. nbands)
            .map(|ib| (0 .. nkpoints)
                 .map(|ik| [rgb[(ib, ik, 0)], rgb[(ib, ik, 1)], rgb[(ib, ik, 2)]])
                 .collect())
            .collect();
        Self { labels: c.channels.labels(), rgb }
    }
}


impl OptProcess for Band {
    fn process(&self) -> Result<()> {
        let files = SessionFiles::in_dir(&self.dir);
        info!("Loading band structure session from {:?} ...", self.dir);
        let session = Session::load(&files)
            .with_context(|| format!("Failed to load the calculation in {:?}", self.dir))?;

        println!("{}", gap_summary(&session.gap, session.dos.coordinates()));

        let species = session.species_contributions()?;
        let orbitals = session.shell_contributions()?;
        for c in species.iter().chain(orbitals.iter()) {
            if c.nzero > 0 {
                warn!("{} (band, k-point) pairs without {:?} projections are left uncolored.", c.nzero, c.channels.labels());
            }
        }

        let energy = session.band.energy();
        let bands = energy.rows().into_iter()
            .map(|r| r.to_owned())
            .collect::<Vec<Vector<f64>>>();
        let mut columns = vec![&session.axis.kpoints];
        columns.extend(bands.iter());
        info!("Writing {} bands along {} k-points to {:?}", bands.len(), session.axis.kpoints.len(), self.txtout);
        write_array_to_txt(&self.txtout, columns, "k-distance  E-VBM(eV) of each band")?;

        let record = BandRecord {
            vbm: session.gap.vbm,
            cbm: session.gap.cbm,
            gap: session.gap.gap,
            kpoints: session.axis.kpoints.to_vec(),
            energy: bands.iter().map(|b| b.to_vec()).collect(),
            ticks: session.axis.ticks.iter()
                .map(|t| TickRecord { label: &t.label, distance: t.distance })
                .collect(),
            species: species.as_ref().map(ColorRecord::new),
            orbitals: orbitals.as_ref().map(ColorRecord::new),
        };

        info!("Writing band data to {:?}", self.jsonout);
        fs::write(&self.jsonout, serde_json::to_string_pretty(&record)?)
            .with_context(|| format!("Failed to write {:?}", self.jsonout))?;

        Ok(())
    }
}
