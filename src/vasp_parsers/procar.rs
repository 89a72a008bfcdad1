//! Reader of the `lm decomposed` PROCAR produced by VASP with `LORBIT >= 10`.
//!
//! The file is read positionally. With `nions` ions and `nbands` bands, line numbers
//! counted from 0:
//!
//! ```text
//! 0                     PROCAR lm decomposed
//! 1                     # of k-points:  165         # of bands:   24         # of ions:    2
//! 3 + ik*K              k-point    1 :    0.00000000 0.00000000 0.00000000     weight = 0.00606061
//! 5 + ik*K + ib*B       band     1 # energy  -10.12345678 # occ.  2.00000000
//! 7 + ik*K + ib*B       ion      s      p      d    tot
//! 8 + ik*K + ib*B + i       1  0.123  0.000  0.000  0.123
//! 8 + ik*K + ib*B + nions   tot  0.246  0.000  0.000  0.246
//! ```
//!
//! where `B = nions + 5` is the size of one band record and `K = B*nbands + 3` the size
//! of one k-point record, i.e. the k-point line of `ik` sits at `(B*nbands + 5)*ik + 3 - 2*ik`.

use std::{
    fs,
    path::Path,
    str::FromStr,
    sync::OnceLock,
};

use log::debug;
use ndarray::{
    Array1,
    Array2,
    Array3,
};
use regex::Regex;

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
};


const HEADER_LINE:         usize = 1;
const FIRST_KPOINT_LINE:   usize = 3;
const ORBITAL_HEADER_LINE: usize = 7;


/// Eigenvalues, occupations and projections of one PROCAR.
///
/// Band-resolved arrays are laid out as `[iband, ikpoint]`, projections as
/// `[iband, ikpoint, iion]` and `[iband, ikpoint, iorbit]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronicDataset {
    pub(crate) kpoint_indices:  Vector<usize>,
    pub(crate) coordinates:     Matrix<f64>,
    pub(crate) weights:         Vector<f64>,
    pub(crate) energy:          Matrix<f64>,
    pub(crate) occupation:      Matrix<f64>,
    pub(crate) total_density:   Matrix<f64>,
    pub(crate) ion_density:     Cube<f64>,
    pub(crate) orbital_density: Cube<f64>,
    pub(crate) orbitals:        Vec<String>,
}


impl ElectronicDataset {
    pub fn from_file(path: &(impl AsRef<Path> + ?Sized)) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .map_err(|source| Error::FileRead { path: path.display().to_string(), source })?;
        txt.parse()
    }

    pub fn nkpoints(&self) -> usize { self.weights.len() }
    pub fn nbands(&self) -> usize { self.energy.nrows() }
    pub fn nions(&self) -> usize { self.ion_density.shape()[2] }
    pub fn norbitals(&self) -> usize { self.orbital_density.shape()[2] }

    /// K-point indices as written in the file, starting from 1.
    pub fn kpoint_indices(&self) -> &Vector<usize> { &self.kpoint_indices }
    /// Fractional reciprocal coordinates, `[ikpoint, 3]`.
    pub fn coordinates(&self) -> &Matrix<f64> { &self.coordinates }
    /// K-point weights (degeneracy).
    pub fn weights(&self) -> &Vector<f64> { &self.weights }
    pub fn energy(&self) -> &Matrix<f64> { &self.energy }
    pub fn occupation(&self) -> &Matrix<f64> { &self.occupation }
    pub fn total_density(&self) -> &Matrix<f64> { &self.total_density }
    pub fn ion_density(&self) -> &Cube<f64> { &self.ion_density }
    pub fn orbital_density(&self) -> &Cube<f64> { &self.orbital_density }
    /// Orbital column labels, e.g. `["s", "p", "d"]`.
    pub fn orbitals(&self) -> &[String] { &self.orbitals }

    /// Subtract `reference` from every eigenvalue.
    pub fn shift_energy(&mut self, reference: f64) {
        self.energy -= reference;
    }
}


impl FromStr for ElectronicDataset {
    type Err = Error;

    fn from_str(txt: &str) -> Result<Self> {
        let lines = Lines(txt.lines().collect());
        let (nkpoints, nbands, nions) = parse_header(&lines)?;
        debug!("PROCAR header: nkpoints = {}, nbands = {}, nions = {}", nkpoints, nbands, nions);

        // "ion  s  p  d  tot": first and last columns are not orbitals
        let orbital_header = lines.tokens(ORBITAL_HEADER_LINE)?;
        if orbital_header.len() < 2 {
            return Err(Error::malformed(ORBITAL_HEADER_LINE + 1, "orbital header has no columns"));
        }
        let orbitals = orbital_header[1 .. orbital_header.len() - 1].iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>();
        let norbitals = orbitals.len();

        let mut ret = Self {
            kpoint_indices:  Array1::zeros(nkpoints),
            coordinates:     Array2::zeros((nkpoints, 3)),
            weights:         Array1::zeros(nkpoints),
            energy:          Array2::zeros((nbands, nkpoints)),
            occupation:      Array2::zeros((nbands, nkpoints)),
            total_density:   Array2::zeros((nbands, nkpoints)),
            ion_density:     Array3::zeros((nbands, nkpoints, nions)),
            orbital_density: Array3::zeros((nbands, nkpoints, norbitals)),
            orbitals,
        };

        for ik in 0 .. nkpoints {
            let kline = kpoint_line(ik, nbands, nions);
            let (index, coord, weight) = parse_kpoint_line(&lines, kline)?;
            ret.kpoint_indices[ik] = index;
            ret.coordinates.row_mut(ik).assign(&Array1::from(coord.to_vec()));
            ret.weights[ik] = weight;

            for ib in 0 .. nbands {
                let bline = band_line(kline, ib, nions);
                ret.energy[(ib, ik)]     = lines.field(bline, 4)?;
                ret.occupation[(ib, ik)] = lines.field(bline, 7)?;

                for ii in 0 .. nions {
                    ret.ion_density[(ib, ik, ii)] = lines.last_field(bline + 3 + ii)?;
                }

                let tline = bline + 3 + nions;
                for io in 0 .. norbitals {
                    ret.orbital_density[(ib, ik, io)] = lines.field(tline, io + 1)?;
                }
                ret.total_density[(ib, ik)] = lines.field(tline, norbitals + 1)?;
            }
        }

        Ok(ret)
    }
}


fn kpoint_line(ik: usize, nbands: usize, nions: usize) -> usize {
    FIRST_KPOINT_LINE + ik * ((nions + 5) * nbands + 3)
}


fn band_line(kline: usize, ib: usize, nions: usize) -> usize {
    kline + 2 + ib * (nions + 5)
}


/// Counts of k-points, bands and ions.
///
/// Each count follows its key either as a separate token (`k-points:  165`) or glued to
/// it when the number is too wide for the field (`k-points:1000`).
fn parse_header(lines: &Lines) -> Result<(usize, usize, usize)> {
    let tokens = lines.tokens(HEADER_LINE)?;
    let count = |key: &str| -> Result<usize> {
        let lineno = HEADER_LINE + 1;
        let pos = tokens.iter()
            .position(|t| t.starts_with(key))
            .ok_or_else(|| Error::malformed(lineno, format!("missing `{}` in header", key)))?;

        let token = if tokens[pos] == key {
            *tokens.get(pos + 1)
                .ok_or_else(|| Error::malformed(lineno, format!("missing count after `{}`", key)))?
        } else {
            leading_digits().find(&tokens[pos][key.len() ..])
                .map(|m| m.as_str())
                .ok_or_else(|| Error::malformed(lineno, format!("no count in `{}`", tokens[pos])))?
        };

        token.parse::<usize>()
            .map_err(|_| Error::malformed(lineno, format!("invalid count `{}` for `{}`", token, key)))
    };

    Ok((count("k-points:")?, count("bands:")?, count("ions:")?))
}


/// Index, fractional coordinate and weight of one k-point line.
///
/// VASP writes the coordinates with a fixed width, so negative components may touch
/// the preceding number (`0.50000000-0.25000000`). Such lines are split with a regex.
fn parse_kpoint_line(lines: &Lines, iline: usize) -> Result<(usize, [f64; 3], f64)> {
    let tokens = lines.tokens(iline)?;
    if tokens.len() == 9 {
        let index  = lines.field(iline, 1)?;
        let coord  = [lines.field(iline, 3)?, lines.field(iline, 4)?, lines.field(iline, 5)?];
        let weight = lines.field(iline, 8)?;
        return Ok((index, coord, weight));
    }

    let line = lines.get(iline)?;
    let caps = kpoint_regex().captures(line)
        .ok_or_else(|| Error::malformed(iline + 1, format!("invalid k-point line `{}`", line.trim())))?;
    let parse = |i: usize| -> Result<f64> {
        let s = &caps[i];
        s.parse::<f64>().map_err(|_| Error::malformed(iline + 1, format!("invalid number `{}`", s)))
    };
    let index = caps[1].parse::<usize>()
        .map_err(|_| Error::malformed(iline + 1, format!("invalid k-point index `{}`", &caps[1])))?;

    Ok((index, [parse(2)?, parse(3)?, parse(4)?], parse(5)?))
}


fn leading_digits() -> &'static Regex {
    static INSTANCE: OnceLock<Regex> = OnceLock::new();
    INSTANCE.get_or_init(|| Regex::new(r"^\d+").expect("valid regex"))
}


fn kpoint_regex() -> &'static Regex {
    static INSTANCE: OnceLock<Regex> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let num = r"([-+]?\d*\.\d+(?:[eE][-+]?\d+)?)";
        Regex::new(&format!(r"k-point\s+(\d+)\s*:\s*{num}\s*{num}\s*{num}\s+weight\s*=\s*{num}"))
            .expect("valid regex")
    })
}


struct Lines<'a>(Vec<&'a str>);

impl<'a> Lines<'a> {
    fn get(&self, iline: usize) -> Result<&'a str> {
        self.0.get(iline)
            .copied()
            .ok_or_else(|| Error::malformed(iline + 1, format!("line missing, file has only {} lines", self.0.len())))
    }

    fn tokens(&self, iline: usize) -> Result<Vec<&'a str>> {
        Ok(self.get(iline)?.split_whitespace().collect())
    }

    fn field<T: FromStr>(&self, iline: usize, itoken: usize) -> Result<T> {
        let token = self.get(iline)?
            .split_whitespace()
            .nth(itoken)
            .ok_or_else(|| Error::malformed(iline + 1, format!("column {} missing", itoken + 1)))?;
        token.parse::<T>()
            .map_err(|_| Error::malformed(iline + 1, format!("invalid number `{}` in column {}", token, itoken + 1)))
    }

    fn last_field<T: FromStr>(&self, iline: usize) -> Result<T> {
        let token = self.get(iline)?
            .split_whitespace()
            .last()
            .ok_or_else(|| Error::malformed(iline + 1, "empty line"))?;
        token.parse::<T>()
            .map_err(|_| Error::malformed(iline + 1, format!("invalid number `{}`", token)))
    }
}
