//! One band-structure job: the structure, a band-path PROCAR and a uniform-mesh PROCAR,
//! aligned to the valence band maximum of the uniform mesh.

use std::path::{
    Path,
    PathBuf,
};

use log::debug;

use crate::{
    contrib::{
        ChannelSet,
        Contributions,
    },
    dos::{
        EnergyHistogram,
        EnergyWindow,
    },
    error::{
        Error,
        Result,
    },
    gap::BandGap,
    ticks::PathAxis,
    vasp_parsers::{
        kpoints,
        poscar::Composition,
        procar::ElectronicDataset,
    },
};


/// Input files of a session, by default the usual names inside one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionFiles {
    pub structure:   PathBuf,
    pub band_procar: PathBuf,
    pub dos_procar:  PathBuf,
    pub kpoints:     PathBuf,
    pub mesh:        PathBuf,
}


impl SessionFiles {
    pub fn in_dir(dir: &(impl AsRef<Path> + ?Sized)) -> Self {
        let dir = dir.as_ref();
        Self {
            structure:   dir.join("CONTCAR"),
            band_procar: dir.join("PROCAR_band"),
            dos_procar:  dir.join("PROCAR_DOS"),
            kpoints:     dir.join("KPOINTS"),
            mesh:        dir.join(kpoints::MESH_FILE_NAME),
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct DosChannels {
    pub total:   EnergyHistogram,
    pub species: Vec<(String, EnergyHistogram)>,
    pub shells:  Vec<(String, EnergyHistogram)>,
}


#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub composition: Composition,
    /// Eigenvalues relative to `gap.vbm`.
    pub band:        ElectronicDataset,
    /// Eigenvalues relative to `gap.vbm`.
    pub dos:         ElectronicDataset,
    /// Band edges of the uniform mesh before alignment.
    pub gap:         BandGap,
    pub axis:        PathAxis,
}


impl Session {
    pub fn load(files: &SessionFiles) -> Result<Self> {
        let composition = Composition::from_file(&files.structure)?;
        let band = ElectronicDataset::from_file(&files.band_procar)?;
        let dos = ElectronicDataset::from_file(&files.dos_procar)?;
        let mesh = kpoints::read_mesh(&files.mesh)?;
        let listing = kpoints::read_listing(&files.kpoints)?;
        Self::from_parts(composition, band, dos, &mesh, &listing)
    }

    /// The two datasets must agree in bands, ions and orbitals, while their k-points
    /// differ by construction.
    pub fn from_parts(composition: Composition, mut band: ElectronicDataset, mut dos: ElectronicDataset,
                      mesh: &[usize], listing: &str) -> Result<Self> {
        if band.nbands() != dos.nbands() {
            return Err(Error::InconsistentDataset(
                format!("band path has {} bands but the uniform mesh has {}", band.nbands(), dos.nbands())));
        }
        if band.nions() != dos.nions() || band.nions() != composition.nions() {
            return Err(Error::InconsistentDataset(
                format!("ion counts differ: {} in band path, {} in uniform mesh, {} in structure",
                        band.nions(), dos.nions(), composition.nions())));
        }
        if band.orbitals() != dos.orbitals() {
            return Err(Error::InconsistentDataset(
                format!("orbital channels differ: {:?} vs {:?}", band.orbitals(), dos.orbitals())));
        }

        let gap = BandGap::from_dataset(&dos)?;
        debug!("Aligning eigenvalues to VBM = {:.6} eV", gap.vbm);
        band.shift_energy(gap.vbm);
        dos.shift_energy(gap.vbm);

        let axis = PathAxis::new(mesh, listing, band.kpoint_indices())?;
        if axis.nkpoints != band.nkpoints() {
            return Err(Error::InconsistentDataset(
                format!("path mesh holds {} k-points but the band path has {}", axis.nkpoints, band.nkpoints())));
        }

        Ok(Self { composition, band, dos, gap, axis })
    }

    pub fn dos_channels(&self, window: &EnergyWindow) -> Result<DosChannels> {
        let total = self.dos.total_dos(window)?;
        let species = self.composition.ion_types().into_iter()
            .map(String::from)
            .zip(self.dos.species_dos(&self.composition, window)?)
            .collect();
        let (labels, hists) = self.dos.shell_dos(window)?;
        let shells = labels.into_iter().zip(hists).collect();
        Ok(DosChannels { total, species, shells })
    }

    /// Species weights along the band path, `None` unless there are 2 or 3 species.
    pub fn species_contributions(&self) -> Result<Option<Contributions>> {
        if !(2 ..= 3).contains(&self.composition.ntypes()) {
            return Ok(None);
        }
        let labels = self.composition.ion_types().into_iter().map(String::from).collect();
        let density = self.band.species_density(&self.composition)?;
        Contributions::new(self.band.energy(), &density, ChannelSet::new(labels)?).map(Some)
    }

    /// Angular momentum weights along the band path, `None` unless there are 2 or 3 shells.
    pub fn shell_contributions(&self) -> Result<Option<Contributions>> {
        let (labels, density) = self.band.shell_density()?;
        if !(2 ..= 3).contains(&labels.len()) {
            return Ok(None);
        }
        Contributions::new(self.band.energy(), &density, ChannelSet::new(labels)?).map(Some)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::vasp_parsers::procar::tests::synthetic_procar;

    const LISTING: &str = "\
Electronic band structure of Cubic, primitive, cP
4
Reciprocal
  0.0 0.0 0.0   1   \\Gamma
  0.0 0.5 0.0   1   X

  0.0 0.5 0.0   1   X
  0.5 0.5 0.0   1   M

";

    fn composition() -> Composition {
        Composition::new(vec![("Ga".to_string(), 1), ("As".to_string(), 1)]).unwrap()
    }

    fn dataset(nkpoints: usize, nbands: usize, nions: usize) -> ElectronicDataset {
        synthetic_procar(nkpoints, nbands, nions, false).parse().unwrap()
    }

    #[test]
    fn test_alignment() {
        let band = dataset(4, 4, 2);
        let dos = dataset(6, 4, 2);
        let gap = BandGap::from_dataset(&dos).unwrap();
        let session = Session::from_parts(composition(), band.clone(), dos, &[2, 2], LISTING).unwrap();

        assert_eq!(session.gap, gap);
        assert_eq!(session.band.energy()[(0, 0)], band.energy()[(0, 0)] - gap.vbm);
        let shifted = BandGap::from_dataset(&session.dos).unwrap();
        assert_eq!(shifted.vbm, 0.0);
        assert_eq!(session.axis.ticks.len(), 3);
    }

    #[test]
    fn test_channels() {
        let session = Session::from_parts(composition(), dataset(4, 4, 2), dataset(6, 4, 2), &[2, 2], LISTING).unwrap();
        let channels = session.dos_channels(&EnergyWindow::default()).unwrap();
        assert_eq!(channels.species.iter().map(|(s, _)| s.as_str()).collect::<Vec<_>>(), vec!["Ga", "As"]);
        assert_eq!(channels.shells.iter().map(|(s, _)| s.as_str()).collect::<Vec<_>>(), vec!["s", "p", "d"]);

        let species = session.species_contributions().unwrap().unwrap();
        assert_eq!(species.weights.shape(), &[4, 4, 2]);
        let shells = session.shell_contributions().unwrap().unwrap();
        assert_eq!(shells.weights.shape(), &[4, 4, 3]);
    }

    #[test]
    fn test_no_contributions() {
        let comp = Composition::new(vec![("Si".to_string(), 2)]).unwrap();
        let session = Session::from_parts(comp, dataset(4, 4, 2), dataset(6, 4, 2), &[2, 2], LISTING).unwrap();
        assert!(session.species_contributions().unwrap().is_none());
    }

    #[test]
    fn test_inconsistent() {
        let r = Session::from_parts(composition(), dataset(4, 4, 2), dataset(6, 6, 2), &[2, 2], LISTING);
        assert!(matches!(r, Err(Error::InconsistentDataset(_))));
        let r = Session::from_parts(composition(), dataset(4, 4, 3), dataset(6, 4, 3), &[2, 2], LISTING);
        assert!(matches!(r, Err(Error::InconsistentDataset(_))));
        let r = Session::from_parts(composition(), dataset(4, 4, 2), dataset(6, 4, 2), &[2, 2, 2], LISTING);
        assert!(matches!(r, Err(Error::InconsistentDataset(_))));
        let r = Session::from_parts(composition(), dataset(6, 4, 2), dataset(6, 4, 2), &[2, 2], LISTING);
        assert!(matches!(r, Err(Error::InconsistentDataset(_))));
    }
}
