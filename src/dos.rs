//! Density of states over the whole Brillouin zone.
//!
//! Every (band, k-point) pair contributes `value * weight[ikpoint]` to the bin its
//! eigenvalue falls in. The same binning serves the total, element-resolved and
//! orbital-resolved channels.

use indexmap::IndexMap;
use itertools::iproduct;
use log::debug;
use ndarray::{
    Array1,
    Array3,
    ArrayView2,
    Axis,
};
use serde::{
    Serialize,
    Deserialize,
};

use crate::{
    error::{
        Error,
        Result,
    },
    types::{
        Vector,
        Matrix,
        Cube,
    },
    vasp_parsers::{
        procar::ElectronicDataset,
        poscar::Composition,
    },
};


/// Bin centers are shifted by this amount so that they do not coincide with
/// eigenvalues printed on a round grid.
pub const BIN_OFFSET: f64 = 0.001;

/// Upper bound of the bin count of one histogram.
pub const MAX_BINS: usize = 10_000_000;


/// How an eigenvalue lying exactly on the edge between two bins is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BinEdges {
    /// Window `(center - step/2, center + step/2)`, edge values are counted by neither bin.
    #[default]
    Strict,
    /// Window `[center - step/2, center + step/2)`, edge values go to the upper bin.
    HalfOpen,
}


#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyWindow {
    pub emin: f64,
    pub emax: f64,
    pub step: f64,
    #[serde(default)]
    pub bin_edges: BinEdges,
}


impl Default for EnergyWindow {
    fn default() -> Self {
        Self {
            emin: -5.0,
            emax:  5.0,
            step:  0.05,
            bin_edges: BinEdges::Strict,
        }
    }
}


impl EnergyWindow {
    pub fn new(emin: f64, emax: f64, step: f64, bin_edges: BinEdges) -> Result<Self> {
        let ret = Self { emin, emax, step, bin_edges };
        ret.validate()?;
        Ok(ret)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.emin.is_finite() && self.emax.is_finite()) {
            return Err(Error::InvalidArgument(format!("energy range [{}, {}] is not finite", self.emin, self.emax)));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidArgument(format!("energy step must be positive, got {}", self.step)));
        }
        let nbins = (self.emax - self.emin) / self.step;
        if !nbins.is_finite() || nbins > MAX_BINS as f64 {
            return Err(Error::InvalidArgument(
                format!("energy window [{}, {}] with step {} needs more than {} bins",
                        self.emin, self.emax, self.step, MAX_BINS)));
        }
        Ok(())
    }

    /// `floor((emax - emin) / step)` bins, but at least one when the range is not empty.
    pub fn nbins(&self) -> usize {
        if self.emax <= self.emin {
            return 0;
        }
        (((self.emax - self.emin) / self.step).floor() as usize).max(1)
    }

    pub fn center(&self, ibin: usize) -> f64 {
        self.emin + ibin as f64 * self.step + BIN_OFFSET
    }

    pub fn centers(&self) -> Vector<f64> {
        (0 .. self.nbins()).map(|i| self.center(i)).collect()
    }

    /// Indices of the bins that count an eigenvalue `e`.
    ///
    /// Only the neighbours of the nearest center are tested against the window.
    fn bins_of(&self, e: f64, nbins: usize) -> impl Iterator<Item = usize> + '_ {
        let half = 0.5 * self.step;
        let guess = ((e - self.emin - BIN_OFFSET) / self.step).round();
        let (lo, hi) = if guess.is_finite() && guess >= -1.0 && guess <= nbins as f64 {
            let guess = guess as i64;
            ((guess - 1).max(0), (guess + 1).min(nbins as i64 - 1))
        } else {
            (1, 0)
        };

        (lo ..= hi)
            .map(|i| i as usize)
            .filter(move |&i| {
                let c = self.center(i);
                match self.bin_edges {
                    BinEdges::Strict => c - half < e && e < c + half,
                    BinEdges::HalfOpen => {
                        // the lower edge of the next bin closes this one, so every
                        // eigenvalue inside the range lands in exactly one bin
                        let upper = if i + 1 < nbins { self.center(i + 1) - half } else { c + half };
                        c - half <= e && e < upper
                    },
                }
            })
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct EnergyHistogram {
    pub energy:  Vector<f64>,
    pub density: Vector<f64>,
}


/// Bins `values[iband, ikpoint]` by `energy[iband, ikpoint]`, weighted by `weights[ikpoint]`.
pub fn histogram(energy: &Matrix<f64>, weights: &Vector<f64>, values: ArrayView2<f64>,
                 window: &EnergyWindow) -> Result<EnergyHistogram> {
    window.validate()?;
    if values.shape() != energy.shape() {
        return Err(Error::InconsistentDataset(
            format!("values of shape {:?} cannot be binned with eigenvalues of shape {:?}", values.shape(), energy.shape())));
    }
    let (nbands, nkpoints) = energy.dim();
    if weights.len() != nkpoints {
        return Err(Error::InconsistentDataset(
            format!("{} k-point weights for {} k-points", weights.len(), nkpoints)));
    }

    let nbins = window.nbins();
    let mut density = Array1::<f64>::zeros(nbins);

    for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
        let e = energy[(ib, ik)];
        for ibin in window.bins_of(e, nbins) {
            density[ibin] += values[(ib, ik)] * weights[ik];
        }
    }

    Ok(EnergyHistogram {
        energy: window.centers(),
        density,
    })
}


/// One histogram per channel of `values[iband, ikpoint, ichannel]`.
pub fn histograms(energy: &Matrix<f64>, weights: &Vector<f64>, values: &Cube<f64>,
                  window: &EnergyWindow) -> Result<Vec<EnergyHistogram>> {
    values.axis_iter(Axis(2))
        .map(|v| histogram(energy, weights, v, window))
        .collect()
}


/// Sums the ion axis of `ion_density[iband, ikpoint, iion]` over the contiguous ion
/// ranges of each species, producing `[iband, ikpoint, ispecies]`.
pub fn sum_by_species(ion_density: &Cube<f64>, composition: &Composition) -> Result<Cube<f64>> {
    let (nbands, nkpoints, nions) = ion_density.dim();
    if composition.nions() != nions {
        return Err(Error::InconsistentDataset(
            format!("composition holds {} ions but the projections have {}", composition.nions(), nions)));
    }

    let ranges = composition.ion_ranges();
    let mut ret = Array3::<f64>::zeros((nbands, nkpoints, ranges.len()));

    for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
        for (it, range) in ranges.iter().enumerate() {
            for ii in range.clone() {
                ret[(ib, ik, it)] += ion_density[(ib, ik, ii)];
            }
        }
    }

    Ok(ret)
}


/// Angular momentum shell of an orbital label: `px` -> `p`, `x2-y2` -> `d`. Unknown
/// labels form their own shell.
pub fn shell_of(orbital: &str) -> &str {
    match orbital {
        "x2-y2" | "dx2" => "d",
        o if o.starts_with(|c| matches!(c, 's' | 'p' | 'd' | 'f')) => &o[.. 1],
        o => o,
    }
}


/// Sums `lm` resolved projections `[iband, ikpoint, iorbit]` into shells, returning the
/// shell labels in order of first appearance and `[iband, ikpoint, ishell]`.
pub fn sum_by_shell(orbitals: &[String], orbital_density: &Cube<f64>) -> Result<(Vec<String>, Cube<f64>)> {
    let (nbands, nkpoints, norbitals) = orbital_density.dim();
    if orbitals.len() != norbitals {
        return Err(Error::InconsistentDataset(
            format!("{} orbital labels for {} orbital projections", orbitals.len(), norbitals)));
    }

    let mut shells = IndexMap::<&str, Vec<usize>>::new();
    for (io, o) in orbitals.iter().enumerate() {
        shells.entry(shell_of(o)).or_default().push(io);
    }

    let mut ret = Array3::<f64>::zeros((nbands, nkpoints, shells.len()));
    for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
        for (is, members) in shells.values().enumerate() {
            for &io in members {
                ret[(ib, ik, is)] += orbital_density[(ib, ik, io)];
            }
        }
    }

    Ok((shells.keys().map(|s| s.to_string()).collect(), ret))
}


impl ElectronicDataset {
    /// Ion projections summed per species, `[iband, ikpoint, ispecies]`.
    pub fn species_density(&self, composition: &Composition) -> Result<Cube<f64>> {
        sum_by_species(&self.ion_density, composition)
    }

    pub fn total_dos(&self, window: &EnergyWindow) -> Result<EnergyHistogram> {
        histogram(&self.energy, &self.weights, self.total_density.view(), window)
    }

    pub fn orbital_dos(&self, window: &EnergyWindow) -> Result<Vec<EnergyHistogram>> {
        histograms(&self.energy, &self.weights, &self.orbital_density, window)
    }

    /// Shell labels and `[iband, ikpoint, ishell]`, see [`sum_by_shell`].
    pub fn shell_density(&self) -> Result<(Vec<String>, Cube<f64>)> {
        sum_by_shell(&self.orbitals, &self.orbital_density)
    }

    pub fn shell_dos(&self, window: &EnergyWindow) -> Result<(Vec<String>, Vec<EnergyHistogram>)> {
        let (shells, density) = self.shell_density()?;
        Ok((shells, histograms(&self.energy, &self.weights, &density, window)?))
    }

    pub fn species_dos(&self, composition: &Composition, window: &EnergyWindow) -> Result<Vec<EnergyHistogram>> {
        let density = self.species_density(composition)?;
        debug!("Binning {} species over {} bins", density.shape()[2], window.nbins());
        histograms(&self.energy, &self.weights, &density, window)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{
        arr1,
        arr2,
    };

    fn window(emin: f64, emax: f64, step: f64) -> EnergyWindow {
        EnergyWindow::new(emin, emax, step, BinEdges::Strict).unwrap()
    }

    /// Straightforward reading of the binning rule, bin by bin.
    fn reference(energy: &Matrix<f64>, weights: &Vector<f64>, values: &Matrix<f64>, w: &EnergyWindow) -> Vector<f64> {
        let mut ret = Array1::zeros(w.nbins());
        for i in 0 .. w.nbins() {
            let c = w.emin + i as f64 * w.step + 0.001;
            for ((ib, ik), &e) in energy.indexed_iter() {
                if c - 0.5 * w.step < e && e < c + 0.5 * w.step {
                    ret[i] += values[(ib, ik)] * weights[ik];
                }
            }
        }
        ret
    }

    #[test]
    fn test_nbins() {
        assert_eq!(window(0.0, 0.0, 0.1).nbins(), 0);
        assert_eq!(window(1.0, 0.0, 0.1).nbins(), 0);
        assert_eq!(window(0.0, 1.0, 2.0).nbins(), 1);
        assert_eq!(window(-5.0, 5.0, 0.5).nbins(), 20);
        assert!(EnergyWindow::new(0.0, 1.0, 0.0, BinEdges::Strict).is_err());
        assert!(EnergyWindow::new(0.0, 1.0, -0.1, BinEdges::Strict).is_err());
    }

    #[test]
    fn test_too_many_bins() {
        let r = EnergyWindow::new(-1e6, 1e6, 1e-15, BinEdges::Strict);
        assert!(matches!(r, Err(Error::InvalidArgument(_))));

        let w = EnergyWindow { emin: -1e6, emax: 1e6, step: 1e-15, bin_edges: BinEdges::Strict };
        let energy = arr2(&[[0.0]]);
        let r = histogram(&energy, &arr1(&[1.0]), energy.view(), &w);
        assert!(matches!(r, Err(Error::InvalidArgument(_))));

        assert!(EnergyWindow::new(0.0, 1.0, 1e-6, BinEdges::Strict).is_ok());
    }

    #[test]
    fn test_histogram() {
        let energy  = arr2(&[[-0.9, -0.6], [0.1, 0.7]]);
        let values  = arr2(&[[ 1.0,  2.0], [3.0,  4.0]]);
        let weights = arr1(&[0.25, 0.75]);
        let w = window(-1.0, 1.0, 0.5);

        let h = histogram(&energy, &weights, values.view(), &w).unwrap();
        assert_eq!(h.energy.len(), 4);
        assert_eq!(h.density.len(), 4);
        // centers: -0.999 -0.499 0.001 0.501
        assert_eq!(h.density.to_vec(), vec![0.25, 1.5, 0.75, 3.0]);
        assert_eq!(h.density, reference(&energy, &weights, &values, &w));
    }

    #[test]
    fn test_matches_reference_and_idempotent() {
        let energy = Matrix::from_shape_fn((7, 5), |(ib, ik)| -3.0 + 0.37 * ib as f64 + 0.113 * ik as f64);
        let values = Matrix::from_shape_fn((7, 5), |(ib, ik)| 0.1 + (ib * 5 + ik) as f64 * 0.01);
        let weights = arr1(&[0.1, 0.2, 0.3, 0.25, 0.15]);
        let w = window(-3.5, 1.0, 0.1);

        let h1 = histogram(&energy, &weights, values.view(), &w).unwrap();
        let h2 = histogram(&energy, &weights, values.view(), &w).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.density, reference(&energy, &weights, &values, &w));
    }

    #[test]
    fn test_edge_ties() {
        let w = window(-0.5, 0.5, 0.5);
        let e = w.center(1) - 0.25;  // lower edge of the second bin
        let energy  = arr2(&[[e]]);
        let values  = arr2(&[[1.0]]);
        let weights = arr1(&[1.0]);

        let strict = histogram(&energy, &weights, values.view(), &w).unwrap();
        assert_eq!(strict.density[1], 0.0);

        let w = EnergyWindow { bin_edges: BinEdges::HalfOpen, ..w };
        let half = histogram(&energy, &weights, values.view(), &w).unwrap();
        assert_eq!(half.density.to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_half_open_counts_everything_inside() {
        let energy = Matrix::from_shape_fn((6, 4), |(ib, ik)| -1.0 + 0.3 * ib as f64 + 0.05 * ik as f64);
        let values = Matrix::from_elem((6, 4), 1.0);
        let weights = Vector::from_elem(4, 1.0);
        let w = EnergyWindow::new(-2.0, 2.0, 0.1, BinEdges::HalfOpen).unwrap();
        let h = histogram(&energy, &weights, values.view(), &w).unwrap();
        assert_eq!(h.density.sum(), 24.0);
    }

    #[test]
    fn test_inconsistent() {
        let energy = arr2(&[[0.0, 1.0]]);
        let w = window(-1.0, 1.0, 0.5);
        assert!(histogram(&energy, &arr1(&[1.0]), arr2(&[[1.0, 1.0]]).view(), &w).is_err());
        assert!(histogram(&energy, &arr1(&[1.0, 1.0]), arr2(&[[1.0]]).view(), &w).is_err());
    }

    #[test]
    fn test_sum_by_species() {
        let ion_density = Cube::from_shape_fn((3, 2, 5), |(ib, ik, ii)| (ib * 100 + ik * 10 + ii) as f64 * 0.1);
        let comp = Composition::new(vec![("Ga".to_string(), 2), ("As".to_string(), 3)]).unwrap();
        let species = sum_by_species(&ion_density, &comp).unwrap();
        assert_eq!(species.shape(), &[3, 2, 2]);

        for (ib, ik) in iproduct!(0 .. 3, 0 .. 2) {
            let first = ion_density[(ib, ik, 0)] + ion_density[(ib, ik, 1)];
            let last  = ion_density[(ib, ik, 2)] + ion_density[(ib, ik, 3)] + ion_density[(ib, ik, 4)];
            assert_eq!(species[(ib, ik, 0)], 0.0 + first);
            assert_eq!(species[(ib, ik, 1)], 0.0 + last);
        }

        let wrong = Composition::new(vec![("Ga".to_string(), 2), ("As".to_string(), 2)]).unwrap();
        assert!(matches!(sum_by_species(&ion_density, &wrong), Err(Error::InconsistentDataset(_))));
    }

    #[test]
    fn test_sum_by_shell() {
        let orbitals = ["s", "py", "pz", "px", "dxy", "dyz", "dz2", "dxz", "x2-y2"]
            .iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let density = Cube::from_shape_fn((2, 2, 9), |(ib, ik, io)| (ib * 2 + ik) as f64 + io as f64 * 0.5);
        let (shells, summed) = sum_by_shell(&orbitals, &density).unwrap();
        assert_eq!(shells, vec!["s", "p", "d"]);
        assert_eq!(summed[(0, 0, 0)], 0.0);
        assert_eq!(summed[(0, 0, 1)], 0.5 + 1.0 + 1.5);
        assert_eq!(summed[(1, 1, 2)], 5.0 * 3.0 + 2.0 + 2.5 + 3.0 + 3.5 + 4.0);

        let plain = ["s", "p", "d"].iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let density = Cube::from_shape_fn((1, 1, 3), |(_, _, io)| io as f64);
        let (shells, summed) = sum_by_shell(&plain, &density).unwrap();
        assert_eq!(shells, plain);
        assert_eq!(summed, density);

        assert!(sum_by_shell(&plain[.. 2], &density).is_err());
    }
}
