//! Horizontal axis of a band structure plot: normalized k-point positions and labeled
//! ticks at the high-symmetry points.

use crate::{
    error::{
        Error,
        Result,
    },
    types::Vector,
};


/// First line of the k-point records in an explicit KPOINTS.
const FIRST_POINT_LINE: usize = 3;


#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position in [0, 1].
    pub distance: f64,
    pub label:    String,
}


#[derive(Clone, Debug, PartialEq)]
pub struct PathAxis {
    pub ticks:    Vec<Tick>,
    /// Position of every k-point in [0, 1].
    pub kpoints:  Vector<f64>,
    pub nkpoints: usize,
}


impl PathAxis {
    /// `mesh` holds the points of each path segment, `listing` the KPOINTS the band
    /// calculation ran with and `kpoint_indices` the 1-based indices from PROCAR.
    pub fn new(mesh: &[usize], listing: &str, kpoint_indices: &Vector<usize>) -> Result<Self> {
        let boundaries = mesh.iter()
            .scan(0usize, |acc, &n| { *acc += n; Some(*acc) })
            .collect::<Vec<_>>();
        let total = boundaries.last().copied().unwrap_or(0);
        if total == 0 {
            return Err(Error::InvalidArgument("k-point mesh without any point".to_string()));
        }

        let labels = tick_labels(listing)?;
        if labels.len() != mesh.len() + 1 {
            return Err(Error::InconsistentDataset(
                format!("path listing has {} segments but the mesh has {}", labels.len().saturating_sub(1), mesh.len())));
        }

        let ticks = std::iter::once(0usize)
            .chain(boundaries)
            .zip(labels)
            .map(|(n, label)| Tick { distance: n as f64 / total as f64, label })
            .collect();

        let kpoints = kpoint_indices.mapv(|i| i as f64 / total as f64);

        Ok(Self { ticks, kpoints, nkpoints: total })
    }
}


/// Labels at the segment boundaries of an explicit KPOINTS, one more than the number
/// of segments. Where one segment ends at a different point than the next one starts
/// the two labels are joined as `A$\mid$ B`.
pub fn tick_labels(listing: &str) -> Result<Vec<String>> {
    let mut segments: Vec<Vec<(usize, &str)>> = vec![vec![]];
    for (i, line) in listing.lines().enumerate().skip(FIRST_POINT_LINE) {
        if line.trim().is_empty() {
            if segments.last().map_or(false, |s| !s.is_empty()) {
                segments.push(vec![]);
            }
        } else if let Some(last) = segments.last_mut() {
            last.push((i, line));
        }
    }
    if segments.last().map_or(false, |s| s.is_empty()) {
        segments.pop();
    }
    if segments.is_empty() {
        return Err(Error::malformed(FIRST_POINT_LINE + 1, "no k-point records in path listing"));
    }

    let label = |(i, line): (usize, &str)| -> Result<String> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.len() < 5 {
            return Err(Error::malformed(i + 1, "segment end without high-symmetry label"));
        }
        Ok(tick_label(tokens[tokens.len() - 1]))
    };

    let mut ret = vec![label(segments[0][0])?];
    for pair in segments.windows(2) {
        let end   = label(pair[0][pair[0].len() - 1])?;
        let start = label(pair[1][0])?;
        if end == start {
            ret.push(end);
        } else {
            ret.push(format!("{}$\\mid$ {}", end, start));
        }
    }
    let last = &segments[segments.len() - 1];
    ret.push(label(last[last.len() - 1])?);

    Ok(ret)
}


/// Labels of more than one character are typeset in math mode: `\Gamma` -> `$\Gamma$`.
pub fn tick_label(raw: &str) -> String {
    if raw.chars().count() > 1 {
        format!("${}$", raw)
    } else {
        raw.to_string()
    }
}
