use itertools::iproduct;

use crate::{
    error::{
        Error,
        Result,
    },
    types::Matrix,
    vasp_parsers::procar::ElectronicDataset,
};


/// States with occupation above this are counted as valence states.
pub const OCCUPATION_THRESHOLD: f64 = 0.01;


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandGap {
    /// `cbm - vbm`, negative when the bands overlap.
    pub gap: f64,
    pub vbm: f64,
    pub cbm: f64,
    /// (iband, ikpoint) of VBM, both starting from 0.
    pub vbm_at: (usize, usize),
    /// (iband, ikpoint) of CBM, both starting from 0.
    pub cbm_at: (usize, usize),
}


impl BandGap {
    pub fn from_dataset(dataset: &ElectronicDataset) -> Result<Self> {
        Self::from_arrays(dataset.energy(), dataset.occupation())
    }

    /// VBM is the highest occupied eigenvalue and CBM the lowest unoccupied one over
    /// the whole (band, k-point) grid.
    pub fn from_arrays(energy: &Matrix<f64>, occupation: &Matrix<f64>) -> Result<Self> {
        if energy.shape() != occupation.shape() {
            return Err(Error::InconsistentDataset(
                format!("energy shape {:?} differs from occupation shape {:?}", energy.shape(), occupation.shape())));
        }

        let (nbands, nkpoints) = energy.dim();
        let mut vbm: Option<(f64, (usize, usize))> = None;
        let mut cbm: Option<(f64, (usize, usize))> = None;

        for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
            let e = energy[(ib, ik)];
            if occupation[(ib, ik)] > OCCUPATION_THRESHOLD {
                if vbm.map_or(true, |(v, _)| e > v) {
                    vbm = Some((e, (ib, ik)));
                }
            } else if cbm.map_or(true, |(c, _)| e < c) {
                cbm = Some((e, (ib, ik)));
            }
        }

        let (vbm, vbm_at) = vbm.ok_or_else(|| Error::DegenerateAnalysis("no occupied states found".to_string()))?;
        let (cbm, cbm_at) = cbm.ok_or_else(|| Error::DegenerateAnalysis("no unoccupied states found".to_string()))?;

        Ok(Self {
            gap: cbm - vbm,
            vbm,
            cbm,
            vbm_at,
            cbm_at,
        })
    }

    pub fn is_direct(&self) -> bool {
        self.vbm_at.1 == self.cbm_at.1
    }

    pub fn is_metal(&self) -> bool {
        self.gap <= 0.0
    }
}
