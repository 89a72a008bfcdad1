//! Explicit band-path KPOINTS and the per-segment mesh stored next to it.
//!
//! The KPOINTS written here lists every k-point in reciprocal coordinates with unit
//! weight. Segments are separated by a blank line and their two ends carry the
//! high-symmetry label as a fifth column:
//!
//! ```text
//! Electronic band structure of Cubic, primitive, cP
//! 52
//! Reciprocal
//!   0.00000000  0.00000000  0.00000000     1   \Gamma
//!   0.00000000  0.05555556  0.00000000     1
//!   ...
//!   0.00000000  0.50000000  0.00000000     1   X
//!
//!   0.00000000  0.50000000  0.00000000     1   X
//! ```

use std::{
    fs,
    path::Path,
};

use crate::{
    error::{
        Error,
        Result,
    },
    kpath::KPath,
    types::Vec3,
};


pub const MESH_FILE_NAME: &str = "POINTS.json";


/// Writes the explicit KPOINTS of the active segments of `kpath`, `counts[i]` points on
/// the i-th active segment with both ends included.
pub fn kpoints_listing(kpath: &KPath, counts: &[usize]) -> Result<String> {
    let segments = kpath.active_segments();
    if segments.len() != counts.len() {
        return Err(Error::InvalidArgument(
            format!("{} active segments but {} point counts", segments.len(), counts.len())));
    }
    if let Some(n) = counts.iter().find(|&&n| n < 2) {
        return Err(Error::InvalidArgument(format!("segment needs at least 2 points, got {}", n)));
    }

    let mut ret = format!("Electronic band structure of {}\n", kpath.bravais);
    ret += &format!("{}\n", counts.iter().sum::<usize>());
    ret.push_str("Reciprocal\n");

    for (seg, &n) in segments.iter().zip(counts) {
        let (p, q) = (kpath.point(&seg.start)?, kpath.point(&seg.end)?);
        write_point(&mut ret, &p, Some(&seg.start));
        for i in 1 .. n - 1 {
            let t = i as f64 / (n - 1) as f64;
            write_point(&mut ret, &[0, 1, 2].map(|j| p[j] + (q[j] - p[j]) * t), None);
        }
        write_point(&mut ret, &q, Some(&seg.end));
        ret.push('\n');
    }

    Ok(ret)
}


fn write_point(s: &mut String, coord: &Vec3<f64>, label: Option<&str>) {
    s.push_str(&format!("{:12.8}{:12.8}{:12.8}     1", coord[0], coord[1], coord[2]));
    if let Some(label) = label {
        s.push_str(&format!("   {}", label));
    }
    s.push('\n');
}


pub fn write_kpoints(path: &(impl AsRef<Path> + ?Sized), kpath: &KPath, counts: &[usize]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, kpoints_listing(kpath, counts)?)
        .map_err(|source| Error::FileWrite { path: path.display().to_string(), source })
}


pub fn read_listing(path: &(impl AsRef<Path> + ?Sized)) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map_err(|source| Error::FileRead { path: path.display().to_string(), source })
}


/// Per-segment point counts, stored as a JSON array of integers.
pub fn read_mesh(path: &(impl AsRef<Path> + ?Sized)) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path)
        .map_err(|source| Error::FileRead { path: path.display().to_string(), source })?;
    Ok(serde_json::from_str(&txt)?)
}


pub fn write_mesh(path: &(impl AsRef<Path> + ?Sized), counts: &[usize]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_string(counts)?)
        .map_err(|source| Error::FileWrite { path: path.display().to_string(), source })
}
