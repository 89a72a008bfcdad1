//! Per-band, per-k-point weights used to color band lines by species or orbital.

use itertools::iproduct;
use ndarray::{
    Array3,
    ArrayView1,
};

use crate::{
    error::{
        Error,
        Result,
    },
    types::{
        Matrix,
        Cube,
    },
};


/// A set of two or three channels (species or orbitals) mapped onto color components.
///
/// Two channels use red and blue, three channels red, green and blue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSet {
    labels: Vec<String>,
}


impl ChannelSet {
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if !(2 ..= 3).contains(&labels.len()) {
            return Err(Error::InvalidArgument(
                format!("color coding needs 2 or 3 channels, got {}: {:?}", labels.len(), labels)));
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false, a set holds at least two channels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Color components of one weight vector.
    pub fn rgb(&self, weights: ArrayView1<f64>) -> [f64; 3] {
        match weights.len() {
            2 => [weights[0], 0.0, weights[1]],
            _ => [weights[0], weights[1], weights[2]],
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Contributions {
    pub channels: ChannelSet,
    /// `[iband, ikpoint, ichannel]`, each vector has unit L2 norm or is all zero.
    pub weights:  Cube<f64>,
    /// Number of (band, k-point) pairs whose projections are all zero.
    pub nzero:    usize,
}


impl Contributions {
    /// Normalizes `density[iband, ikpoint, ichannel]` to unit L2 norm for every
    /// (band, k-point). Vectors with zero norm are emitted as zero vectors.
    pub fn new(energy: &Matrix<f64>, density: &Cube<f64>, channels: ChannelSet) -> Result<Self> {
        let (nbands, nkpoints, nchannels) = density.dim();
        if energy.dim() != (nbands, nkpoints) {
            return Err(Error::InconsistentDataset(
                format!("eigenvalues of shape {:?} but projections of shape {:?}", energy.shape(), density.shape())));
        }
        if nchannels != channels.len() {
            return Err(Error::InconsistentDataset(
                format!("{} channel labels for {} projection channels", channels.len(), nchannels)));
        }

        let mut weights = Array3::<f64>::zeros((nbands, nkpoints, nchannels));
        let mut nzero = 0usize;

        for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
            let norm = (0 .. nchannels)
                .map(|ic| density[(ib, ik, ic)].powi(2))
                .sum::<f64>()
                .sqrt();

            if norm == 0.0 {
                nzero += 1;
                continue;
            }

            for ic in 0 .. nchannels {
                weights[(ib, ik, ic)] = density[(ib, ik, ic)] / norm;
            }
        }

        Ok(Self { channels, weights, nzero })
    }

    /// Color components of every (band, k-point), `[iband, ikpoint, 3]`.
    pub fn rgb(&self) -> Cube<f64> {
        let (nbands, nkpoints, _) = self.weights.dim();
        let mut ret = Array3::<f64>::zeros((nbands, nkpoints, 3));
        for (ib, ik) in iproduct!(0 .. nbands, 0 .. nkpoints) {
            let c = self.channels.rgb(self.weights.slice(ndarray::s![ib, ik, ..]));
            for (i, v) in c.into_iter().enumerate() {
                ret[(ib, ik, i)] = v;
            }
        }
        ret
    }
}
