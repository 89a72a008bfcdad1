use std::{
    io::Write,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use anyhow::{
    bail,
    Context,
};
use clap::Args;
use colored::Colorize;
use log::info;

use crate::{
    gap::BandGap,
    settings::Settings,
    types::{
        Result,
        Vector,
        Matrix,
    },
};


#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[arg(long, short = 'c')]
    /// Settings file in TOML format, overrides the user configuration file.
    pub config: Option<PathBuf>,

    #[arg(long)]
    /// Print the default settings in TOML and exit.
    pub gen_template: bool,
}


impl SettingsArgs {
    /// `None` when only the template was requested.
    pub fn load(&self) -> Result<Option<Settings>> {
        if self.gen_template {
            info!("Printing the settings template, save it as {:?} to make it the default.",
                  Settings::user_config_path().unwrap_or_else(|| PathBuf::from("config.toml")));
            println!("{}", Settings::template()?);
            return Ok(None);
        }
        Settings::load(self.config.as_deref()).map(Some)
    }
}


/// Writes columns of equal length to a whitespace separated text file.
pub fn write_array_to_txt(file_name: &(impl AsRef<Path> + ?Sized), ys: Vec<&Vector<f64>>, comment: &str) -> Result<()> {
    let ncol = ys.len();

    let x = ys.first().context("At least one data set is needed")?;
    let nrow = x.len();

    if nrow == 0 || !ys.iter().all(|y| y.len() == nrow) {
        bail!("[WRT_ARRAY]: input data with zero length or they don't have consistent lengths");
    }

    let mut f = fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(file_name)?;

    writeln!(f, "# {}", comment.trim())?;

    for irow in 0 .. nrow {
        let mut s = String::with_capacity(16 * ncol + 1);
        for y in ys.iter() {
            s.push_str(&format!("  {:15.6}", y[irow]));
        }
        s.push('\n');

        f.write_all(s.as_bytes())?;
    }

    Ok(())
}


/// Colored summary of the band edges, `coordinates` holds the k-points as rows.
pub fn gap_summary(gap: &BandGap, coordinates: &Matrix<f64>) -> String {
    let mut output = String::with_capacity(400);
    output.push_str("--------------------------------------------------------------------------------\n");
    if gap.is_metal() {
        output.push_str(&format!(" Current system is  {:^20}, bands overlap by {} eV\n",
                                 "Metal".bright_yellow(), format!("{:5.3}", -gap.gap).bright_cyan()));
    } else {
        let is_direct = if gap.is_direct() { "Direct Gap" } else { "Indirect Gap" };
        output.push_str(&format!(" Current system has {:^16} of {:^10} eV\n",
                                 is_direct.bright_yellow(), format!("{:5.3}", gap.gap).bright_cyan()));
    }

    for (name, (ib, ik), e) in [("CBM", gap.cbm_at, gap.cbm), ("VBM", gap.vbm_at, gap.vbm)] {
        let k = coordinates.row(ik);
        output.push_str(&format!("  {} @ k-point {:5} of ({:6.3},{:6.3},{:6.3}) , band {:5} of {:8} eV\n",
                                 name, ik + 1, k[0], k[1], k[2], ib + 1,
                                 format!("{:8.3}", e).bright_blue()));
    }
    output.push_str("--------------------------------------------------------------------------------");
    output
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{
        arr1,
        arr2,
    };
    use tempdir::TempDir;

    #[test]
    fn test_write_array_to_txt() {
        let dir = TempDir::new("rsbands").unwrap();
        let fname = dir.path().join("out.txt");
        let x = arr1(&[0.0, 0.5]);
        let y = arr1(&[1.0, -2.0]);
        write_array_to_txt(&fname, vec![&x, &y], "  x y ").unwrap();

        let txt = fs::read_to_string(&fname).unwrap();
        let lines = txt.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "# x y");
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["0.500000", "-2.000000"]);

        let z = arr1(&[1.0]);
        assert!(write_array_to_txt(&fname, vec![&x, &z], "").is_err());
        assert!(write_array_to_txt(&fname, vec![], "").is_err());
    }

    #[test]
    fn test_gap_summary() {
        colored::control::set_override(false);
        let gap = BandGap::from_arrays(&arr2(&[[-2.0, -1.0], [1.0, 2.0]]), &arr2(&[[1.0, 1.0], [0.0, 0.0]])).unwrap();
        let coords = arr2(&[[0.0, 0.0, 0.0], [0.5, 0.0, 0.0]]);
        let txt = gap_summary(&gap, &coords);
        assert!(txt.contains("Indirect Gap"));
        assert!(txt.contains("2.000"));
        assert!(txt.contains("VBM @ k-point     2"));
    }
}
