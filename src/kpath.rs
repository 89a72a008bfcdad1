//! High-symmetry points and band paths of the 14 Bravais lattices.
//!
//! Points and paths follow Setyawan & Curtarolo, Comput. Mater. Sci. 49, 299 (2010).
//! Coordinates are fractional in the reciprocal basis of the primitive cell. Lattice
//! parameters are those of the conventional cell, except for `hR` which takes the
//! rhombohedral cell (a = b = c, α = β = γ). Orthorhombic lattices expect a < b < c
//! (`oS` only a < b), monoclinic ones a, b < c and α < 90° with α the angle between b
//! and c. Other axis orders are rejected.

use std::{
    f64::consts::PI,
    fmt,
    str::FromStr,
};

use indexmap::IndexMap;
use log::debug;
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
        Vec3,
        Mat33,
    },
};


const ANGLE_TOLERANCE: f64 = 1E-4;  // in degrees
const LENGTH_TOLERANCE: f64 = 1E-10;

const G: &str = "\\Gamma";


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bravais {
    TriclinicP,
    MonoclinicP,
    MonoclinicC,
    OrthorhombicP,
    OrthorhombicF,
    OrthorhombicI,
    OrthorhombicC,
    TetragonalP,
    TetragonalI,
    HexagonalP,
    RhombohedralP,
    CubicP,
    CubicF,
    CubicI,
}


impl Bravais {
    pub const ALL: [Bravais; 14] = [
        Self::TriclinicP,
        Self::MonoclinicP,
        Self::MonoclinicC,
        Self::OrthorhombicP,
        Self::OrthorhombicF,
        Self::OrthorhombicI,
        Self::OrthorhombicC,
        Self::TetragonalP,
        Self::TetragonalI,
        Self::HexagonalP,
        Self::RhombohedralP,
        Self::CubicP,
        Self::CubicF,
        Self::CubicI,
    ];

    /// Pearson symbol, e.g. `cF`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::TriclinicP    => "aP",
            Self::MonoclinicP   => "mP",
            Self::MonoclinicC   => "mS",
            Self::OrthorhombicP => "oP",
            Self::OrthorhombicF => "oF",
            Self::OrthorhombicI => "oI",
            Self::OrthorhombicC => "oS",
            Self::TetragonalP   => "tP",
            Self::TetragonalI   => "tI",
            Self::HexagonalP    => "hP",
            Self::RhombohedralP => "hR",
            Self::CubicP        => "cP",
            Self::CubicF        => "cF",
            Self::CubicI        => "cI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TriclinicP    => "Triclinic, primitive",
            Self::MonoclinicP   => "Monoclinic, primitive",
            Self::MonoclinicC   => "Monoclinic, C-centered",
            Self::OrthorhombicP => "Orthorhombic, primitive",
            Self::OrthorhombicF => "Orthorhombic, face-centered",
            Self::OrthorhombicI => "Orthorhombic, body-centered",
            Self::OrthorhombicC => "Orthorhombic, C-centered",
            Self::TetragonalP   => "Tetragonal, primitive",
            Self::TetragonalI   => "Tetragonal, body-centered",
            Self::HexagonalP    => "Hexagonal, primitive",
            Self::RhombohedralP => "Rhombohedral, primitive",
            Self::CubicP        => "Cubic, primitive",
            Self::CubicF        => "Cubic, face-centered",
            Self::CubicI        => "Cubic, body-centered",
        }
    }

    /// Rows are the primitive vectors in units of the conventional ones.
    fn primitive_transform(&self) -> Mat33<f64> {
        const P: Mat33<f64> = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        const F: Mat33<f64> = [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]];
        const I: Mat33<f64> = [[-0.5, 0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, -0.5]];
        const C: Mat33<f64> = [[0.5, -0.5, 0.0], [0.5, 0.5, 0.0], [0.0, 0.0, 1.0]];
        const S: Mat33<f64> = [[0.5, 0.5, 0.0], [-0.5, 0.5, 0.0], [0.0, 0.0, 1.0]];

        match self {
            Self::CubicF | Self::OrthorhombicF => F,
            Self::CubicI | Self::OrthorhombicI | Self::TetragonalI => I,
            Self::OrthorhombicC => C,
            Self::MonoclinicC   => S,
            _ => P,
        }
    }
}


impl fmt::Display for Bravais {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.description(), self.symbol())
    }
}


/// Accepts the Pearson symbol (`cF`, case insensitive, `oC`/`mC` for the C-centered
/// lattices) or the full `Cubic, face-centered, cF` form.
impl FromStr for Bravais {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.rsplit(',').next().unwrap_or(s).trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "oc" => "os",
            "mc" => "ms",
            k    => k,
        };
        Self::ALL.iter()
            .find(|b| b.symbol().to_ascii_lowercase() == key)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(
                format!("unknown Bravais lattice `{}`, available: {}", s,
                        Self::ALL.iter().map(|b| b.symbol()).collect::<Vec<_>>().join(", "))))
    }
}


/// Conventional lattice parameters, lengths in Å and angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta:  f64,
    pub gamma: f64,
}


impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        let ret = Self { a, b, c, alpha, beta, gamma };
        ret.cell()?;
        Ok(ret)
    }

    /// Lattice vectors as rows, `a` along x and `b` in the xy plane.
    pub fn cell(&self) -> Result<Mat33<f64>> {
        let Self { a, b, c, alpha, beta, gamma } = *self;
        if [a, b, c].iter().any(|&x| !(x.is_finite() && x > 0.0)) {
            return Err(Error::InvalidArgument(format!("lattice lengths must be positive, got {} {} {}", a, b, c)));
        }
        if [alpha, beta, gamma].iter().any(|&x| !(x.is_finite() && x > 0.0 && x < 180.0)) {
            return Err(Error::InvalidArgument(
                format!("lattice angles must lie in (0, 180), got {} {} {}", alpha, beta, gamma)));
        }

        let (ca, cb, cg) = (alpha.to_radians().cos(), beta.to_radians().cos(), gamma.to_radians().cos());
        let sg = gamma.to_radians().sin();
        let cy = (ca - cb * cg) / sg;
        let cz2 = 1.0 - cb * cb - cy * cy;
        if cz2 <= 0.0 {
            return Err(Error::InvalidArgument(
                format!("angles {} {} {} do not form a lattice", alpha, beta, gamma)));
        }

        Ok([
            [a,       0.0,     0.0],
            [b * cg,  b * sg,  0.0],
            [c * cb,  c * cy,  c * cz2.sqrt()],
        ])
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct HighSymmetryPoint {
    pub label: String,
    pub coord: Vec3<f64>,
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    pub start:  String,
    pub end:    String,
    pub active: bool,
}


#[derive(Clone, Debug, PartialEq)]
pub struct KPath {
    pub bravais:  Bravais,
    pub lattice:  LatticeParameters,
    /// Setyawan-Curtarolo name of the lattice variant, e.g. `BCT2`.
    pub variant:  &'static str,
    pub points:   IndexMap<String, Vec3<f64>>,
    pub segments: Vec<PathSegment>,
    reciprocal:   Mat33<f64>,
}


impl KPath {
    pub fn new(bravais: Bravais, lattice: LatticeParameters) -> Result<Self> {
        check_axes(bravais, &lattice)?;
        let conventional = lattice.cell()?;
        let primitive = matmul(&bravais.primitive_transform(), &conventional);
        let reciprocal = reciprocal(&primitive)?;

        let (variant, points, branches) = table(bravais, &lattice, &reciprocal)?;
        debug!("K-path of {} resolved to variant {}", bravais, variant);

        let points = points.into_iter()
            .map(|(label, coord)| (label.to_string(), coord))
            .collect::<IndexMap<_, _>>();

        let mut segments = vec![];
        for branch in branches {
            for pair in branch.windows(2) {
                for label in pair {
                    if !points.contains_key(*label) {
                        return Err(Error::InvalidArgument(format!("path point {} missing in {}", label, variant)));
                    }
                }
                segments.push(PathSegment {
                    start: pair[0].to_string(),
                    end:   pair[1].to_string(),
                    active: true,
                });
            }
        }

        Ok(Self { bravais, lattice, variant, points, segments, reciprocal })
    }

    pub fn high_symmetry_points(&self) -> Vec<HighSymmetryPoint> {
        self.points.iter()
            .map(|(label, coord)| HighSymmetryPoint { label: label.clone(), coord: *coord })
            .collect()
    }

    pub fn point(&self, label: &str) -> Result<Vec3<f64>> {
        self.points.get(label)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("no high-symmetry point {} in {}", label, self.variant)))
    }

    /// Reciprocal vectors of the primitive cell as rows, including the 2π factor.
    pub fn reciprocal(&self) -> &Mat33<f64> {
        &self.reciprocal
    }

    /// Cartesian coordinate in 1/Å of a fractional reciprocal coordinate.
    pub fn cartesian(&self, frac: &Vec3<f64>) -> Vec3<f64> {
        let r = &self.reciprocal;
        [0, 1, 2].map(|j| frac[0] * r[0][j] + frac[1] * r[1][j] + frac[2] * r[2][j])
    }

    pub fn distance(&self, from: &str, to: &str) -> Result<f64> {
        let (p, q) = (self.cartesian(&self.point(from)?), self.cartesian(&self.point(to)?));
        Ok(norm(&[q[0] - p[0], q[1] - p[1], q[2] - p[2]]))
    }

    /// Activates exactly the segments with the given indices.
    pub fn select(&mut self, indices: &[usize]) -> Result<()> {
        if let Some(i) = indices.iter().find(|&&i| i >= self.segments.len()) {
            return Err(Error::InvalidArgument(
                format!("segment index {} out of range, path has {} segments", i, self.segments.len())));
        }
        for (i, seg) in self.segments.iter_mut().enumerate() {
            seg.active = indices.contains(&i);
        }
        Ok(())
    }

    pub fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        let nseg = self.segments.len();
        self.segments.get_mut(index)
            .ok_or_else(|| Error::InvalidArgument(format!("segment index {} out of range, path has {} segments", index, nseg)))?
            .active = active;
        Ok(())
    }

    pub fn active_segments(&self) -> Vec<&PathSegment> {
        self.segments.iter().filter(|s| s.active).collect()
    }

    /// Number of k-points on each active segment, endpoints included.
    ///
    /// The shortest active segment gets `min_points` points, longer ones proportionally
    /// more, so the spacing is about the same along the whole path. Zero-length
    /// segments get `min_points`.
    pub fn segment_counts(&self, min_points: usize) -> Result<Vec<usize>> {
        let min_points = min_points.max(2);
        let lengths = self.active_segments().into_iter()
            .map(|s| self.distance(&s.start, &s.end))
            .collect::<Result<Vec<f64>>>()?;

        let shortest = lengths.iter()
            .copied()
            .filter(|&l| l > LENGTH_TOLERANCE)
            .fold(f64::INFINITY, f64::min);

        Ok(lengths.into_iter()
            .map(|l| {
                if l > LENGTH_TOLERANCE {
                    ((min_points as f64 * l / shortest).round() as usize).max(min_points)
                } else {
                    min_points
                }
            })
            .collect())
    }
}


/// The variant formulas assume the axis order of the module docs, other orders would
/// silently pick the wrong variant.
fn check_axes(bravais: Bravais, p: &LatticeParameters) -> Result<()> {
    let le = |x: f64, y: f64| x <= y * (1.0 + 1E-8);
    let right = |x: f64| (x - 90.0).abs() < ANGLE_TOLERANCE;
    let LatticeParameters { a, b, c, alpha, beta, gamma } = *p;

    let ok = match bravais {
        Bravais::OrthorhombicP | Bravais::OrthorhombicF | Bravais::OrthorhombicI =>
            le(a, b) && le(b, c) && right(alpha) && right(beta) && right(gamma),
        Bravais::OrthorhombicC =>
            le(a, b) && right(alpha) && right(beta) && right(gamma),
        Bravais::MonoclinicP | Bravais::MonoclinicC =>
            le(a, c) && le(b, c) && alpha < 90.0 + ANGLE_TOLERANCE && right(beta) && right(gamma),
        _ => true,
    };
    if ok {
        return Ok(());
    }

    let expected = match bravais {
        Bravais::OrthorhombicC => "a <= b and right angles",
        Bravais::MonoclinicP | Bravais::MonoclinicC => "a, b <= c, alpha <= 90 and beta = gamma = 90",
        _ => "a <= b <= c and right angles",
    };
    Err(Error::InvalidArgument(
        format!("{} expects {}, got {} {} {} {} {} {}", bravais, expected, a, b, c, alpha, beta, gamma)))
}


type Table = (&'static str, Vec<(&'static str, Vec3<f64>)>, Vec<Vec<&'static str>>);


fn table(bravais: Bravais, p: &LatticeParameters, recip: &Mat33<f64>) -> Result<Table> {
    let LatticeParameters { a, b, c, alpha, .. } = *p;
    let (sa, ca) = (alpha.to_radians().sin(), alpha.to_radians().cos());
    let (a2, b2, c2) = (a * a, b * b, c * c);

    let ret: Table = match bravais {
        Bravais::CubicP => ("CUB",
            vec![(G, [0.0, 0.0, 0.0]), ("M", [0.5, 0.5, 0.0]), ("R", [0.5, 0.5, 0.5]), ("X", [0.0, 0.5, 0.0])],
            vec![vec![G, "X", "M", G, "R", "X"], vec!["M", "R"]]),

        Bravais::CubicF => ("FCC",
            vec![(G, [0.0, 0.0, 0.0]),
                 ("K", [3.0 / 8.0, 3.0 / 8.0, 3.0 / 4.0]),
                 ("L", [0.5, 0.5, 0.5]),
                 ("U", [5.0 / 8.0, 1.0 / 4.0, 5.0 / 8.0]),
                 ("W", [0.5, 0.25, 0.75]),
                 ("X", [0.5, 0.0, 0.5])],
            vec![vec![G, "X", "W", "K", G, "L", "U", "W", "L", "K"], vec!["U", "X"]]),

        Bravais::CubicI => ("BCC",
            vec![(G, [0.0, 0.0, 0.0]), ("H", [0.5, -0.5, 0.5]), ("P", [0.25, 0.25, 0.25]), ("N", [0.0, 0.0, 0.5])],
            vec![vec![G, "H", "N", G, "P", "H"], vec!["P", "N"]]),

        Bravais::TetragonalP => ("TET",
            vec![(G, [0.0, 0.0, 0.0]),
                 ("A", [0.5, 0.5, 0.5]),
                 ("M", [0.5, 0.5, 0.0]),
                 ("R", [0.0, 0.5, 0.5]),
                 ("X", [0.0, 0.5, 0.0]),
                 ("Z", [0.0, 0.0, 0.5])],
            vec![vec![G, "X", "M", G, "Z", "R", "A", "Z"], vec!["X", "R"], vec!["M", "A"]]),

        Bravais::TetragonalI if c < a => {
            let eta = (1.0 + c2 / a2) / 4.0;
            ("BCT1",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("M", [-0.5, 0.5, 0.5]),
                  ("N", [0.0, 0.5, 0.0]),
                  ("P", [0.25, 0.25, 0.25]),
                  ("X", [0.0, 0.0, 0.5]),
                  ("Z", [eta, eta, -eta]),
                  ("Z_1", [-eta, 1.0 - eta, eta])],
             vec![vec![G, "X", "M", G, "Z", "P", "N", "Z_1", "M"], vec!["X", "P"]])
        },

        Bravais::TetragonalI => {
            let eta  = (1.0 + a2 / c2) / 4.0;
            let zeta = a2 / (2.0 * c2);
            ("BCT2",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("N", [0.0, 0.5, 0.0]),
                  ("P", [0.25, 0.25, 0.25]),
                  ("\\Sigma", [-eta, eta, eta]),
                  ("\\Sigma_1", [eta, 1.0 - eta, -eta]),
                  ("X", [0.0, 0.0, 0.5]),
                  ("Y", [-zeta, zeta, 0.5]),
                  ("Y_1", [0.5, 0.5, -zeta]),
                  ("Z", [0.5, 0.5, -0.5])],
             vec![vec![G, "X", "Y", "\\Sigma", G, "Z", "\\Sigma_1", "N", "P", "Y_1", "Z"], vec!["X", "P"]])
        },

        Bravais::OrthorhombicP => ("ORC",
            vec![(G, [0.0, 0.0, 0.0]),
                 ("R", [0.5, 0.5, 0.5]),
                 ("S", [0.5, 0.5, 0.0]),
                 ("T", [0.0, 0.5, 0.5]),
                 ("U", [0.5, 0.0, 0.5]),
                 ("X", [0.5, 0.0, 0.0]),
                 ("Y", [0.0, 0.5, 0.0]),
                 ("Z", [0.0, 0.0, 0.5])],
            vec![vec![G, "X", "S", "Y", G, "Z", "U", "R", "T", "Z"], vec!["Y", "T"], vec!["U", "X"], vec!["S", "R"]]),

        Bravais::OrthorhombicF => {
            let lhs = 1.0 / a2;
            let rhs = 1.0 / b2 + 1.0 / c2;
            if (lhs - rhs).abs() <= 1E-8 * lhs || lhs > rhs {
                let zeta = (1.0 + a2 / b2 - a2 / c2) / 4.0;
                let eta  = (1.0 + a2 / b2 + a2 / c2) / 4.0;
                let points = vec![
                    (G, [0.0, 0.0, 0.0]),
                    ("A", [0.5, 0.5 + zeta, zeta]),
                    ("A_1", [0.5, 0.5 - zeta, 1.0 - zeta]),
                    ("L", [0.5, 0.5, 0.5]),
                    ("T", [1.0, 0.5, 0.5]),
                    ("X", [0.0, eta, eta]),
                    ("X_1", [1.0, 1.0 - eta, 1.0 - eta]),
                    ("Y", [0.5, 0.0, 0.5]),
                    ("Z", [0.5, 0.5, 0.0]),
                ];
                if (lhs - rhs).abs() <= 1E-8 * lhs {
                    ("ORCF3", points,
                     vec![vec![G, "Y", "T", "Z", G, "X", "A_1", "Y"], vec!["X", "A", "Z"], vec!["L", G]])
                } else {
                    ("ORCF1", points,
                     vec![vec![G, "Y", "T", "Z", G, "X", "A_1", "Y"], vec!["T", "X_1"], vec!["X", "A", "Z"], vec!["L", G]])
                }
            } else {
                let eta   = (1.0 + a2 / b2 - a2 / c2) / 4.0;
                let phi   = (1.0 + c2 / b2 - c2 / a2) / 4.0;
                let delta = (1.0 + b2 / a2 - b2 / c2) / 4.0;
                ("ORCF2",
                 vec![(G, [0.0, 0.0, 0.0]),
                      ("C", [0.5, 0.5 - eta, 1.0 - eta]),
                      ("C_1", [0.5, 0.5 + eta, eta]),
                      ("D", [0.5 - delta, 0.5, 1.0 - delta]),
                      ("D_1", [0.5 + delta, 0.5, delta]),
                      ("L", [0.5, 0.5, 0.5]),
                      ("H", [1.0 - phi, 0.5 - phi, 0.5]),
                      ("H_1", [phi, 0.5 + phi, 0.5]),
                      ("X", [0.0, 0.5, 0.5]),
                      ("Y", [0.5, 0.0, 0.5]),
                      ("Z", [0.5, 0.5, 0.0])],
                 vec![vec![G, "Y", "C", "D", "X", G, "Z", "D_1", "H", "C"], vec!["C_1", "Z"], vec!["X", "H_1"],
                      vec!["H", "Y"], vec!["L", G]])
            }
        },

        Bravais::OrthorhombicI => {
            let zeta  = (1.0 + a2 / c2) / 4.0;
            let eta   = (1.0 + b2 / c2) / 4.0;
            let delta = (b2 - a2) / (4.0 * c2);
            let mu    = (a2 + b2) / (4.0 * c2);
            ("ORCI",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("L", [-mu, mu, 0.5 - delta]),
                  ("L_1", [mu, -mu, 0.5 + delta]),
                  ("L_2", [0.5 - delta, 0.5 + delta, -mu]),
                  ("R", [0.0, 0.5, 0.0]),
                  ("S", [0.5, 0.0, 0.0]),
                  ("T", [0.0, 0.0, 0.5]),
                  ("W", [0.25, 0.25, 0.25]),
                  ("X", [-zeta, zeta, zeta]),
                  ("X_1", [zeta, 1.0 - zeta, -zeta]),
                  ("Y", [eta, -eta, eta]),
                  ("Y_1", [1.0 - eta, eta, -eta]),
                  ("Z", [0.5, 0.5, -0.5])],
             vec![vec![G, "X", "L", "T", "W", "R", "X_1", "Z", G, "Y", "S", "W"], vec!["L_1", "Y"], vec!["Y_1", "Z"]])
        },

        Bravais::OrthorhombicC => {
            let zeta = (1.0 + a2 / b2) / 4.0;
            ("ORCC",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("A", [zeta, zeta, 0.5]),
                  ("A_1", [-zeta, 1.0 - zeta, 0.5]),
                  ("R", [0.0, 0.5, 0.5]),
                  ("S", [0.0, 0.5, 0.0]),
                  ("T", [-0.5, 0.5, 0.5]),
                  ("X", [zeta, zeta, 0.0]),
                  ("X_1", [-zeta, 1.0 - zeta, 0.0]),
                  ("Y", [-0.5, 0.5, 0.0]),
                  ("Z", [0.0, 0.0, 0.5])],
             vec![vec![G, "X", "S", "R", "A", "Z", G, "Y", "X_1", "A_1", "T", "Y"], vec!["Z", "T"]])
        },

        Bravais::HexagonalP => ("HEX",
            vec![(G, [0.0, 0.0, 0.0]),
                 ("A", [0.0, 0.0, 0.5]),
                 ("H", [1.0 / 3.0, 1.0 / 3.0, 0.5]),
                 ("K", [1.0 / 3.0, 1.0 / 3.0, 0.0]),
                 ("L", [0.5, 0.0, 0.5]),
                 ("M", [0.5, 0.0, 0.0])],
            vec![vec![G, "M", "K", G, "A", "L", "H", "A"], vec!["L", "M"], vec!["K", "H"]]),

        Bravais::RhombohedralP if alpha < 90.0 => {
            let eta = (1.0 + 4.0 * ca) / (2.0 + 4.0 * ca);
            let nu  = 0.75 - eta / 2.0;
            ("RHL1",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("B", [eta, 0.5, 1.0 - eta]),
                  ("B_1", [0.5, 1.0 - eta, eta - 1.0]),
                  ("F", [0.5, 0.5, 0.0]),
                  ("L", [0.5, 0.0, 0.0]),
                  ("L_1", [0.0, 0.0, -0.5]),
                  ("P", [eta, nu, nu]),
                  ("P_1", [1.0 - nu, 1.0 - nu, 1.0 - eta]),
                  ("P_2", [nu, nu, eta - 1.0]),
                  ("Q", [1.0 - nu, nu, 0.0]),
                  ("X", [nu, 0.0, -nu]),
                  ("Z", [0.5, 0.5, 0.5])],
             vec![vec![G, "L", "B_1"], vec!["B", "Z", G, "X"], vec!["Q", "F", "P_1", "Z"], vec!["L", "P"]])
        },

        Bravais::RhombohedralP => {
            let eta = 1.0 / (2.0 * (alpha.to_radians() / 2.0).tan().powi(2));
            let nu  = 0.75 - eta / 2.0;
            ("RHL2",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("F", [0.5, -0.5, 0.0]),
                  ("L", [0.5, 0.0, 0.0]),
                  ("P", [1.0 - nu, -nu, 1.0 - nu]),
                  ("P_1", [nu, nu - 1.0, nu - 1.0]),
                  ("Q", [eta, eta, eta]),
                  ("Q_1", [1.0 - eta, -eta, -eta]),
                  ("Z", [0.5, -0.5, 0.5])],
             vec![vec![G, "P", "Z", "Q", G, "F", "P_1", "Q_1", "L", "Z"]])
        },

        Bravais::MonoclinicP => {
            let eta = (1.0 - b * ca / c) / (2.0 * sa * sa);
            let nu  = 0.5 - eta * c * ca / b;
            ("MCL",
             vec![(G, [0.0, 0.0, 0.0]),
                  ("A", [0.5, 0.5, 0.0]),
                  ("C", [0.0, 0.5, 0.5]),
                  ("D", [0.5, 0.0, 0.5]),
                  ("D_1", [0.5, 0.0, -0.5]),
                  ("E", [0.5, 0.5, 0.5]),
                  ("H", [0.0, eta, 1.0 - nu]),
                  ("H_1", [0.0, 1.0 - eta, nu]),
                  ("H_2", [0.0, eta, -nu]),
                  ("M", [0.5, eta, 1.0 - nu]),
                  ("M_1", [0.5, 1.0 - eta, nu]),
                  ("M_2", [0.5, eta, -nu]),
                  ("X", [0.0, 0.5, 0.0]),
                  ("Y", [0.0, 0.0, 0.5]),
                  ("Y_1", [0.0, 0.0, -0.5]),
                  ("Z", [0.5, 0.0, 0.0])],
             vec![vec![G, "Y", "H", "C", "E", "M_1", "A", "X", "H_1"], vec!["M", "D", "Z"], vec!["Y", "D"]])
        },

        Bravais::MonoclinicC => monoclinic_c(a, b, c, sa, ca, recip),

        Bravais::TriclinicP => {
            let kalpha = angle(&recip[1], &recip[2]);
            let kbeta  = angle(&recip[2], &recip[0]);
            let kgamma = angle(&recip[0], &recip[1]);
            let right  = (kgamma - 90.0).abs() < ANGLE_TOLERANCE;

            if kalpha + kbeta + kgamma > 270.0 {
                (if right { "TRI2a" } else { "TRI1a" },
                 vec![(G, [0.0, 0.0, 0.0]),
                      ("L", [0.5, 0.5, 0.0]),
                      ("M", [0.0, 0.5, 0.5]),
                      ("N", [0.5, 0.0, 0.5]),
                      ("R", [0.5, 0.5, 0.5]),
                      ("X", [0.5, 0.0, 0.0]),
                      ("Y", [0.0, 0.5, 0.0]),
                      ("Z", [0.0, 0.0, 0.5])],
                 vec![vec!["X", G, "Y"], vec!["L", G, "Z"], vec!["N", G, "M"], vec!["R", G]])
            } else {
                (if right { "TRI2b" } else { "TRI1b" },
                 vec![(G, [0.0, 0.0, 0.0]),
                      ("L", [0.5, -0.5, 0.0]),
                      ("M", [0.0, 0.0, 0.5]),
                      ("N", [-0.5, -0.5, 0.5]),
                      ("R", [0.0, -0.5, 0.5]),
                      ("X", [0.0, -0.5, 0.0]),
                      ("Y", [0.5, 0.0, 0.0]),
                      ("Z", [-0.5, 0.0, 0.5])],
                 vec![vec!["X", G, "Y"], vec!["L", G, "Z"], vec!["N", G, "M"], vec!["R", G]])
            }
        },
    };

    if ret.1.iter().flat_map(|(_, x)| x.iter()).any(|x| !x.is_finite()) {
        return Err(Error::InvalidArgument(format!("lattice parameters {:?} are degenerate for {}", p, ret.0)));
    }

    Ok(ret)
}


fn monoclinic_c(a: f64, b: f64, c: f64, sa: f64, ca: f64, recip: &Mat33<f64>) -> Table {
    let (a2, b2) = (a * a, b * b);
    let kgamma = angle(&recip[0], &recip[1]);

    if kgamma >= 90.0 - ANGLE_TOLERANCE {
        let zeta = (2.0 - b * ca / c) / (4.0 * sa * sa);
        let eta  = 0.5 + 2.0 * zeta * c * ca / b;
        let psi  = 0.75 - a2 / (4.0 * b2 * sa * sa);
        let phi  = psi + (0.75 - psi) * b * ca / c;
        let mut points = vec![
            (G, [0.0, 0.0, 0.0]),
            ("N", [0.5, 0.0, 0.0]),
            ("N_1", [0.0, -0.5, 0.0]),
            ("F", [1.0 - zeta, 1.0 - zeta, 1.0 - eta]),
            ("F_1", [zeta, zeta, eta]),
            ("F_2", [-zeta, -zeta, 1.0 - eta]),
            ("I", [phi, 1.0 - phi, 0.5]),
            ("I_1", [1.0 - phi, phi - 1.0, 0.5]),
            ("L", [0.5, 0.5, 0.5]),
            ("M", [0.5, 0.0, 0.5]),
            ("X", [1.0 - psi, psi - 1.0, 0.0]),
            ("X_1", [psi, 1.0 - psi, 0.0]),
            ("X_2", [psi - 1.0, -psi, 0.0]),
            ("Y", [0.5, 0.5, 0.0]),
            ("Y_1", [-0.5, -0.5, 0.0]),
            ("Z", [0.0, 0.0, 0.5]),
        ];

        return if kgamma > 90.0 + ANGLE_TOLERANCE {
            ("MCLC1", points,
             vec![vec![G, "Y", "F", "L", "I"], vec!["I_1", "Z", "F_1"], vec!["Y", "X_1"], vec!["X", G, "N"], vec!["M", G]])
        } else {
            // F_3 is outside the zone once kγ > 90°
            points.insert(6, ("F_3", [1.0 - zeta, -zeta, 1.0 - eta]));
            ("MCLC2", points,
             vec![vec![G, "Y", "F", "L", "I"], vec!["I_1", "Z", "F_1"], vec!["N", G, "M"]])
        };
    }

    let x = b * ca / c + b2 * sa * sa / a2;
    if x <= 1.0 + 1E-8 {
        let mu    = (1.0 + b2 / a2) / 4.0;
        let delta = b * c * ca / (2.0 * a2);
        let zeta  = mu - 0.25 + (1.0 - b * ca / c) / (4.0 * sa * sa);
        let eta   = 0.5 + 2.0 * zeta * c * ca / b;
        let phi   = 1.0 + zeta - 2.0 * mu;
        let psi   = eta - 2.0 * delta;
        let points = vec![
            (G, [0.0, 0.0, 0.0]),
            ("F", [1.0 - phi, 1.0 - phi, 1.0 - psi]),
            ("F_1", [phi, phi - 1.0, psi]),
            ("F_2", [1.0 - phi, -phi, 1.0 - psi]),
            ("H", [zeta, zeta, eta]),
            ("H_1", [1.0 - zeta, -zeta, 1.0 - eta]),
            ("H_2", [-zeta, -zeta, 1.0 - eta]),
            ("I", [0.5, -0.5, 0.5]),
            ("M", [0.5, 0.0, 0.5]),
            ("N", [0.5, 0.0, 0.0]),
            ("N_1", [0.0, -0.5, 0.0]),
            ("X", [0.5, -0.5, 0.0]),
            ("Y", [mu, mu, delta]),
            ("Y_1", [1.0 - mu, -mu, -delta]),
            ("Y_2", [-mu, -mu, -delta]),
            ("Y_3", [mu, mu - 1.0, delta]),
            ("Z", [0.0, 0.0, 0.5]),
        ];

        if (x - 1.0).abs() <= 1E-8 {
            ("MCLC4", points,
             vec![vec![G, "Y", "F", "H", "Z", "I"], vec!["H_1", "Y_1", "X", G, "N"], vec!["M", G]])
        } else {
            ("MCLC3", points,
             vec![vec![G, "Y", "F", "H", "Z", "I", "F_1"], vec!["H_1", "Y_1", "X", G, "N"], vec!["M", G]])
        }
    } else {
        let zeta  = (b2 / a2 + (1.0 - b * ca / c) / (sa * sa)) / 4.0;
        let eta   = 0.5 + 2.0 * zeta * c * ca / b;
        let mu    = eta / 2.0 + b2 / (4.0 * a2) - b * c * ca / (2.0 * a2);
        let nu    = 2.0 * mu - zeta;
        let omega = (4.0 * nu - 1.0 - b2 * sa * sa / a2) * c / (2.0 * b * ca);
        let delta = zeta * c * ca / b + omega / 2.0 - 0.25;
        let rho   = 1.0 - zeta * a2 / b2;
        ("MCLC5",
         vec![(G, [0.0, 0.0, 0.0]),
              ("F", [nu, nu, omega]),
              ("F_1", [1.0 - nu, 1.0 - nu, 1.0 - omega]),
              ("F_2", [nu, nu - 1.0, omega]),
              ("H", [zeta, zeta, eta]),
              ("H_1", [1.0 - zeta, -zeta, 1.0 - eta]),
              ("H_2", [-zeta, -zeta, 1.0 - eta]),
              ("I", [rho, 1.0 - rho, 0.5]),
              ("I_1", [1.0 - rho, rho - 1.0, 0.5]),
              ("L", [0.5, 0.5, 0.5]),
              ("M", [0.5, 0.0, 0.5]),
              ("N", [0.5, 0.0, 0.0]),
              ("N_1", [0.0, -0.5, 0.0]),
              ("X", [0.5, -0.5, 0.0]),
              ("Y", [mu, mu, delta]),
              ("Y_1", [1.0 - mu, -mu, -delta]),
              ("Y_2", [-mu, -mu, -delta]),
              ("Y_3", [mu, mu - 1.0, delta]),
              ("Z", [0.0, 0.0, 0.5])],
         vec![vec![G, "Y", "F", "L", "I"], vec!["I_1", "Z", "H", "F_1"], vec!["H_1", "Y_1", "X", G, "N"], vec!["M", G]])
    }
}


fn matmul(m: &Mat33<f64>, n: &Mat33<f64>) -> Mat33<f64> {
    let mut ret = [[0.0; 3]; 3];
    for i in 0 .. 3 {
        for j in 0 .. 3 {
            ret[i][j] = (0 .. 3).map(|k| m[i][k] * n[k][j]).sum();
        }
    }
    ret
}


fn cross(u: &Vec3<f64>, v: &Vec3<f64>) -> Vec3<f64> {
    [u[1] * v[2] - u[2] * v[1],
     u[2] * v[0] - u[0] * v[2],
     u[0] * v[1] - u[1] * v[0]]
}


fn dot(u: &Vec3<f64>, v: &Vec3<f64>) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}


fn norm(u: &Vec3<f64>) -> f64 {
    dot(u, u).sqrt()
}


/// Angle between two vectors in degrees.
fn angle(u: &Vec3<f64>, v: &Vec3<f64>) -> f64 {
    (dot(u, v) / (norm(u) * norm(v))).clamp(-1.0, 1.0).acos().to_degrees()
}


fn reciprocal(cell: &Mat33<f64>) -> Result<Mat33<f64>> {
    let volume = dot(&cell[0], &cross(&cell[1], &cell[2]));
    if volume.abs() < LENGTH_TOLERANCE {
        return Err(Error::InvalidArgument("lattice vectors are coplanar".to_string()));
    }
    let f = 2.0 * PI / volume;
    Ok([
        cross(&cell[1], &cell[2]).map(|x| x * f),
        cross(&cell[2], &cell[0]).map(|x| x * f),
        cross(&cell[0], &cell[1]).map(|x| x * f),
    ])
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use itertools::iproduct;

    fn params(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> LatticeParameters {
        LatticeParameters::new(a, b, c, alpha, beta, gamma).unwrap()
    }

    #[test]
    fn test_parse_bravais() {
        assert_eq!("cP".parse::<Bravais>().unwrap(), Bravais::CubicP);
        assert_eq!("CF".parse::<Bravais>().unwrap(), Bravais::CubicF);
        assert_eq!("oC".parse::<Bravais>().unwrap(), Bravais::OrthorhombicC);
        assert_eq!("Monoclinic, C-centered, mS".parse::<Bravais>().unwrap(), Bravais::MonoclinicC);
        for b in Bravais::ALL {
            assert_eq!(b.to_string().parse::<Bravais>().unwrap(), b);
        }
        assert!("xP".parse::<Bravais>().is_err());
    }

    #[test]
    fn test_invalid_lattice() {
        assert!(LatticeParameters::new(0.0, 1.0, 1.0, 90.0, 90.0, 90.0).is_err());
        assert!(LatticeParameters::new(1.0, 1.0, 1.0, 90.0, 90.0, 180.0).is_err());
        assert!(LatticeParameters::new(1.0, 1.0, 1.0, 10.0, 10.0, 100.0).is_err());
    }

    #[test]
    fn test_cubic() {
        let kpath = KPath::new(Bravais::CubicP, params(4.0, 4.0, 4.0, 90.0, 90.0, 90.0)).unwrap();
        assert_eq!(kpath.variant, "CUB");
        assert_eq!(kpath.points.keys().collect::<Vec<_>>(), vec![G, "M", "R", "X"]);
        assert_eq!(kpath.segments.len(), 6);
        assert_eq!((kpath.segments[0].start.as_str(), kpath.segments[0].end.as_str()), (G, "X"));
        assert_eq!((kpath.segments[5].start.as_str(), kpath.segments[5].end.as_str()), ("M", "R"));

        let unit = 2.0 * PI / 4.0;
        assert_relative_eq!(kpath.distance(G, "X").unwrap(), 0.5 * unit, epsilon = 1E-12);
        assert_relative_eq!(kpath.distance("X", "M").unwrap(), 0.5 * unit, epsilon = 1E-12);
        assert_relative_eq!(kpath.distance("M", G).unwrap(), 0.5 * 2f64.sqrt() * unit, epsilon = 1E-12);
        assert_relative_eq!(kpath.distance(G, "R").unwrap(), 0.5 * 3f64.sqrt() * unit, epsilon = 1E-12);
        assert_relative_eq!(kpath.distance("R", "X").unwrap(), 0.5 * 2f64.sqrt() * unit, epsilon = 1E-12);

        assert_eq!(kpath.segment_counts(10).unwrap(), vec![10, 10, 14, 17, 14, 10]);
    }

    #[test]
    fn test_selection() {
        let mut kpath = KPath::new(Bravais::CubicP, params(4.0, 4.0, 4.0, 90.0, 90.0, 90.0)).unwrap();
        kpath.select(&[2, 3]).unwrap();
        assert_eq!(kpath.active_segments().len(), 2);
        // Γ-R is now measured against M-Γ
        assert_eq!(kpath.segment_counts(10).unwrap(), vec![10, 12]);
        assert_eq!(kpath.segment_counts(10).unwrap(), kpath.segment_counts(10).unwrap());

        kpath.set_active(0, true).unwrap();
        assert_eq!(kpath.segment_counts(10).unwrap(), vec![10, 14, 17]);
        assert!(kpath.select(&[6]).is_err());
        assert!(kpath.set_active(6, false).is_err());

        kpath.select(&[]).unwrap();
        assert!(kpath.segment_counts(10).unwrap().is_empty());
    }

    #[test]
    fn test_min_points_floor() {
        let kpath = KPath::new(Bravais::CubicP, params(4.0, 4.0, 4.0, 90.0, 90.0, 90.0)).unwrap();
        assert!(kpath.segment_counts(0).unwrap().iter().all(|&n| n >= 2));
    }

    #[test]
    fn test_fcc_primitive() {
        let kpath = KPath::new(Bravais::CubicF, params(5.0, 5.0, 5.0, 90.0, 90.0, 90.0)).unwrap();
        // X of fcc is at 2π/a along a cartesian axis
        assert_relative_eq!(kpath.distance(G, "X").unwrap(), 2.0 * PI / 5.0, epsilon = 1E-12);
        // L at √3 π/a
        assert_relative_eq!(kpath.distance(G, "L").unwrap(), 3f64.sqrt() * PI / 5.0, epsilon = 1E-12);
    }

    #[test]
    fn test_hexagonal() {
        let kpath = KPath::new(Bravais::HexagonalP, params(3.0, 3.0, 5.0, 90.0, 90.0, 120.0)).unwrap();
        assert_relative_eq!(kpath.distance(G, "K").unwrap(), 4.0 * PI / 9.0, epsilon = 1E-12);
        assert_relative_eq!(kpath.distance(G, "A").unwrap(), PI / 5.0, epsilon = 1E-12);
    }

    #[test]
    fn test_variants() {
        let cases = [
            (Bravais::CubicP,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0), "CUB"),
            (Bravais::CubicF,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0), "FCC"),
            (Bravais::CubicI,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0), "BCC"),
            (Bravais::TetragonalP,   params(3.0, 3.0, 5.0,  90.0,  90.0,  90.0), "TET"),
            (Bravais::TetragonalI,   params(4.0, 4.0, 3.0,  90.0,  90.0,  90.0), "BCT1"),
            (Bravais::TetragonalI,   params(3.0, 3.0, 5.0,  90.0,  90.0,  90.0), "BCT2"),
            (Bravais::OrthorhombicP, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0), "ORC"),
            (Bravais::OrthorhombicF, params(3.0, 5.0, 6.0,  90.0,  90.0,  90.0), "ORCF1"),
            (Bravais::OrthorhombicF, params(5.0, 6.0, 7.0,  90.0,  90.0,  90.0), "ORCF2"),
            (Bravais::OrthorhombicF, params(orcf3_a(5.0, 6.0), 5.0, 6.0, 90.0, 90.0, 90.0), "ORCF3"),
            (Bravais::OrthorhombicI, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0), "ORCI"),
            (Bravais::OrthorhombicC, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0), "ORCC"),
            (Bravais::HexagonalP,    params(3.0, 3.0, 5.0,  90.0,  90.0, 120.0), "HEX"),
            (Bravais::RhombohedralP, params(5.0, 5.0, 5.0,  60.0,  60.0,  60.0), "RHL1"),
            (Bravais::RhombohedralP, params(5.0, 5.0, 5.0, 100.0, 100.0, 100.0), "RHL2"),
            (Bravais::MonoclinicP,   params(3.0, 4.0, 5.0,  70.0,  90.0,  90.0), "MCL"),
        ];

        for (bravais, lattice, variant) in cases {
            let kpath = KPath::new(bravais, lattice).unwrap();
            assert_eq!(kpath.variant, variant, "{}", bravais);
            assert!(kpath.points.contains_key(G));
            assert!(kpath.segment_counts(5).unwrap().iter().all(|&n| n >= 5));
        }
    }

    /// `a` with 1/a² = 1/b² + 1/c².
    fn orcf3_a(b: f64, c: f64) -> f64 {
        1.0 / (1.0 / (b * b) + 1.0 / (c * c)).sqrt()
    }

    fn monoclinic_cases() -> Vec<(LatticeParameters, &'static str)> {
        let (sa, ca) = (70f64.to_radians().sin(), 70f64.to_radians().cos());
        vec![
            (params(3.0, 4.0, 5.0, 70.0, 90.0, 90.0), "MCLC1"),
            // kγ = 90° for a = b sinα
            (params(4.0 * sa, 4.0, 5.0, 70.0, 90.0, 90.0), "MCLC2"),
            (params(5.0, 4.0, 5.0, 80.0, 90.0, 90.0), "MCLC3"),
            // b cosα / c + b² sin²α / a² = 1
            (params(4.0 * sa / (1.0 - 4.0 * ca / 5.0).sqrt(), 4.0, 5.0, 70.0, 90.0, 90.0), "MCLC4"),
            (params(3.0, 3.0, 4.0, 70.0, 90.0, 90.0), "MCLC5"),
        ]
    }

    #[test]
    fn test_low_symmetry_variants() {
        for (lattice, variant) in monoclinic_cases() {
            let kpath = KPath::new(Bravais::MonoclinicC, lattice).unwrap();
            assert_eq!(kpath.variant, variant, "{:?}", lattice);
            assert_eq!(kpath.points.contains_key("F_3"), variant == "MCLC2");
        }

        // kγ = 90° for cosγ = cosα cosβ
        let gamma = |alpha: f64, beta: f64| (alpha.to_radians().cos() * beta.to_radians().cos()).acos().to_degrees();
        let cases = [
            (params(3.0, 4.0, 5.0,  80.0,  85.0, 95.0), "TRI1a"),
            (params(3.0, 4.0, 5.0, 100.0, 105.0, 95.0), "TRI1b"),
            (params(3.0, 4.0, 5.0,  80.0,  85.0, gamma(80.0, 85.0)), "TRI2a"),
            (params(3.0, 4.0, 5.0, 100.0, 105.0, gamma(100.0, 105.0)), "TRI2b"),
        ];
        for (lattice, variant) in cases {
            let kpath = KPath::new(Bravais::TriclinicP, lattice).unwrap();
            assert_eq!(kpath.variant, variant, "{:?}", lattice);
            for seg in &kpath.segments {
                assert!(kpath.points.contains_key(&seg.start));
                assert!(kpath.points.contains_key(&seg.end));
            }
        }
    }

    /// Every point but Γ is as far from Γ as from some reciprocal lattice vector, and
    /// no lattice vector is closer.
    fn assert_on_zone_boundary(kpath: &KPath) {
        for (label, coord) in kpath.points.iter().filter(|(label, _)| label.as_str() != G) {
            let k = kpath.cartesian(coord);
            let radius = norm(&k);
            let nearest = iproduct!(-3 ..= 3, -3 ..= 3, -3 ..= 3)
                .filter(|&n| n != (0, 0, 0))
                .map(|(i, j, l)| {
                    let g = kpath.cartesian(&[i as f64, j as f64, l as f64]);
                    norm(&[k[0] - g[0], k[1] - g[1], k[2] - g[2]])
                })
                .fold(f64::INFINITY, f64::min);
            assert!((nearest - radius).abs() < 1E-9 * radius,
                    "{} of {} is {} from Γ but {} from the nearest G", label, kpath.variant, radius, nearest);
        }
    }

    #[test]
    fn test_zone_boundary() {
        let cases = [
            (Bravais::CubicP,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0)),
            (Bravais::CubicF,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0)),
            (Bravais::CubicI,        params(4.0, 4.0, 4.0,  90.0,  90.0,  90.0)),
            (Bravais::TetragonalP,   params(3.0, 3.0, 5.0,  90.0,  90.0,  90.0)),
            (Bravais::TetragonalI,   params(4.0, 4.0, 3.0,  90.0,  90.0,  90.0)),
            (Bravais::TetragonalI,   params(3.0, 3.0, 5.0,  90.0,  90.0,  90.0)),
            (Bravais::OrthorhombicP, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0)),
            (Bravais::OrthorhombicF, params(3.0, 5.0, 6.0,  90.0,  90.0,  90.0)),
            (Bravais::OrthorhombicF, params(5.0, 6.0, 7.0,  90.0,  90.0,  90.0)),
            (Bravais::OrthorhombicF, params(orcf3_a(5.0, 6.0), 5.0, 6.0, 90.0, 90.0, 90.0)),
            (Bravais::OrthorhombicI, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0)),
            (Bravais::OrthorhombicC, params(3.0, 4.0, 5.0,  90.0,  90.0,  90.0)),
            (Bravais::HexagonalP,    params(3.0, 3.0, 5.0,  90.0,  90.0, 120.0)),
            (Bravais::RhombohedralP, params(5.0, 5.0, 5.0,  60.0,  60.0,  60.0)),
            (Bravais::RhombohedralP, params(5.0, 5.0, 5.0, 100.0, 100.0, 100.0)),
            (Bravais::MonoclinicP,   params(3.0, 4.0, 5.0,  70.0,  90.0,  90.0)),
        ];
        for (bravais, lattice) in cases {
            assert_on_zone_boundary(&KPath::new(bravais, lattice).unwrap());
        }
        for (lattice, _) in monoclinic_cases() {
            assert_on_zone_boundary(&KPath::new(Bravais::MonoclinicC, lattice).unwrap());
        }
    }

    #[test]
    fn test_axis_order() {
        let unsorted = [
            (Bravais::OrthorhombicP, params(5.0, 4.0, 3.0,  90.0, 90.0, 90.0)),
            (Bravais::OrthorhombicF, params(3.0, 6.0, 5.0,  90.0, 90.0, 90.0)),
            (Bravais::OrthorhombicI, params(3.0, 4.0, 5.0,  90.0, 90.0, 80.0)),
            (Bravais::OrthorhombicC, params(4.0, 3.0, 5.0,  90.0, 90.0, 90.0)),
            (Bravais::MonoclinicP,   params(3.0, 6.0, 5.0,  70.0, 90.0, 90.0)),
            (Bravais::MonoclinicC,   params(3.0, 4.0, 5.0, 110.0, 90.0, 90.0)),
            (Bravais::MonoclinicC,   params(6.0, 4.0, 5.0,  80.0, 90.0, 90.0)),
        ];
        for (bravais, lattice) in unsorted {
            let r = KPath::new(bravais, lattice);
            assert!(matches!(r, Err(Error::InvalidArgument(_))), "{} {:?}", bravais, lattice);
        }

        // ORCC only orders a and b
        assert!(KPath::new(Bravais::OrthorhombicC, params(3.0, 5.0, 4.0, 90.0, 90.0, 90.0)).is_ok());
        assert!(KPath::new(Bravais::OrthorhombicP, params(4.0, 4.0, 5.0, 90.0, 90.0, 90.0)).is_ok());
    }
}
