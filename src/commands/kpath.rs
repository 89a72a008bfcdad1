use std::path::PathBuf;

use clap::Args;
use log::info;

use crate::{
    cli::OptProcess,
    commands::common::SettingsArgs,
    kpath::{
        Bravais,
        KPath,
        LatticeParameters,
    },
    types::Result,
    vasp_parsers::kpoints::{
        write_kpoints,
        write_mesh,
        MESH_FILE_NAME,
    },
};


#[derive(Debug, Args)]
/// Generate the KPOINTS of a band-path calculation for one of the 14 Bravais lattices.
///
/// The shortest segment gets `--min-points` k-points and the others proportionally
/// more. Points and paths follow Setyawan & Curtarolo (2010).
pub struct Kpath {
    #[command(flatten)]
    settings: SettingsArgs,

    #[arg(required_unless_present = "gen_template")]
    /// Pearson symbol of the lattice: aP mP mS oP oF oI oS tP tI hP hR cP cF cI
    bravais: Option<Bravais>,

    #[arg(long, num_args = 3, value_names = ["A", "B", "C"], required_unless_present = "gen_template")]
    /// Conventional lattice lengths in Angstrom. Rhombohedral lattices take a = b = c.
    abc: Vec<f64>,

    #[arg(long, num_args = 3, value_names = ["ALPHA", "BETA", "GAMMA"], default_values_t = [90.0, 90.0, 90.0])]
    /// Conventional lattice angles in degrees.
    angles: Vec<f64>,

    #[arg(long, short = 'n')]
    /// K-points on the shortest segment, at least 2.
    min_points: Option<usize>,

    #[arg(long, value_delimiter = ',')]
    /// Indices of the segments to keep, as printed by `--list`, e.g. `0,1,2,5`.
    segments: Option<Vec<usize>>,

    #[arg(long)]
    /// Print the high-symmetry points and path segments and exit.
    list: bool,

    #[arg(long, short = 'o', default_value = "KPOINTS")]
    /// Output KPOINTS file.
    kpoints: PathBuf,

    #[arg(long, default_value = MESH_FILE_NAME)]
    /// Output file of the per-segment k-point counts.
    mesh: PathBuf,
}


impl Kpath {
    fn lattice(&self) -> Result<LatticeParameters> {
        match (self.abc.as_slice(), self.angles.as_slice()) {
            (&[a, b, c], &[alpha, beta, gamma]) => Ok(LatticeParameters::new(a, b, c, alpha, beta, gamma)?),
            _ => anyhow::bail!("Three lattice lengths and three angles are needed."),
        }
    }

    fn print_path(kpath: &KPath) -> Result<()> {
        println!("{} ({})", kpath.bravais, kpath.variant);
        println!("High-symmetry points:");
        for p in kpath.high_symmetry_points() {
            println!("  {:>10}  ({:8.5}, {:8.5}, {:8.5})", p.label, p.coord[0], p.coord[1], p.coord[2]);
        }
        println!("Segments:");
        for (i, s) in kpath.segments.iter().enumerate() {
            println!("  {:3}  {:>10} -> {:<10}  {:8.5} 1/A", i, s.start, s.end, kpath.distance(&s.start, &s.end)?);
        }
        Ok(())
    }
}


impl OptProcess for Kpath {
    fn process(&self) -> Result<()> {
        let settings = match self.settings.load()? {
            Some(s) => s,
            None => return Ok(()),
        };

        let bravais = self.bravais.ok_or_else(|| anyhow::anyhow!("Bravais lattice is missing."))?;
        let mut kpath = KPath::new(bravais, self.lattice()?)?;
        info!("Lattice resolved to {} ({})", kpath.bravais, kpath.variant);

        if self.list {
            return Self::print_path(&kpath);
        }

        if let Some(segments) = self.segments.as_ref() {
            kpath.select(segments)?;
        }

        let counts = kpath.segment_counts(self.min_points.unwrap_or(settings.kpath.min_points))?;
        if counts.is_empty() {
            anyhow::bail!("No path segment selected.");
        }
        info!("{} segments with {} k-points in total", counts.len(), counts.iter().sum::<usize>());

        write_kpoints(&self.kpoints, &kpath, &counts)?;
        info!("K-points written to {:?}", self.kpoints);
        write_mesh(&self.mesh, &counts)?;
        info!("Segment counts written to {:?}", self.mesh);

        Ok(())
    }
}
