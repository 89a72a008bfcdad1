use std::{
    fs,
    path::Path,
    str::FromStr,
};

use crate::error::{
    Error,
    Result,
};


/// Element symbols and ions per type, in the order the ions are listed in POSCAR/CONTCAR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    species: Vec<(String, usize)>,
}


impl Composition {
    pub fn new(species: Vec<(String, usize)>) -> Result<Self> {
        if species.is_empty() {
            return Err(Error::InvalidArgument("composition without any species".to_string()));
        }
        Ok(Self { species })
    }

    pub fn from_file(path: &(impl AsRef<Path> + ?Sized)) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .map_err(|source| Error::FileRead { path: path.display().to_string(), source })?;
        txt.parse()
    }

    pub fn ion_types(&self) -> Vec<&str> {
        self.species.iter().map(|(s, _)| s.as_str()).collect()
    }

    pub fn ions_per_type(&self) -> Vec<usize> {
        self.species.iter().map(|(_, n)| *n).collect()
    }

    pub fn ntypes(&self) -> usize {
        self.species.len()
    }

    pub fn nions(&self) -> usize {
        self.species.iter().map(|(_, n)| n).sum()
    }

    /// Half-open ranges of ion indices occupied by each species.
    pub fn ion_ranges(&self) -> Vec<std::ops::Range<usize>> {
        self.species.iter()
            .scan(0usize, |start, (_, n)| {
                let r = *start .. *start + n;
                *start += n;
                Some(r)
            })
            .collect()
    }
}


/// Reads the species block of a POSCAR. VASP 5 files carry the symbols on line 6 and
/// the counts on line 7, VASP 4 files only the counts on line 6.
impl FromStr for Composition {
    type Err = Error;

    fn from_str(txt: &str) -> Result<Self> {
        let lines = txt.lines().collect::<Vec<_>>();
        let line = |i: usize| -> Result<Vec<&str>> {
            lines.get(i)
                .map(|l| l.split_whitespace().collect())
                .ok_or_else(|| Error::malformed(i + 1, "unexpected end of POSCAR"))
        };

        let first = line(5)?;
        let vasp4 = first.first().map_or(false, |t| t.parse::<usize>().is_ok());
        let (symbols, counts, icounts) = if vasp4 {
            let symbols = (1 ..= first.len()).map(|i| format!("X{}", i)).collect::<Vec<_>>();
            (symbols, first, 5)
        } else {
            let symbols = first.iter().map(|s| s.to_string()).collect::<Vec<_>>();
            (symbols, line(6)?, 6)
        };

        if symbols.is_empty() || symbols.len() != counts.len() {
            return Err(Error::malformed(icounts + 1,
                format!("{} element symbols but {} ion counts", symbols.len(), counts.len())));
        }

        let counts = counts.into_iter()
            .map(|c| c.parse::<usize>()
                 .map_err(|_| Error::malformed(icounts + 1, format!("invalid ion count `{}`", c))))
            .collect::<Result<Vec<_>>>()?;

        Self::new(symbols.into_iter().zip(counts).collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const CONTCAR: &str = "\
Ga As
   1.00000000000000
     5.6500000000000000    0.0000000000000000    0.0000000000000000
     0.0000000000000000    5.6500000000000000    0.0000000000000000
     0.0000000000000000    0.0000000000000000    5.6500000000000000
   Ga   As
     2     3
Direct
  0.0000000000000000  0.0000000000000000  0.0000000000000000
";

    #[test]
    fn test_parse_vasp5() {
        let comp = CONTCAR.parse::<Composition>().unwrap();
        assert_eq!(comp.ion_types(), vec!["Ga", "As"]);
        assert_eq!(comp.ions_per_type(), vec![2, 3]);
        assert_eq!(comp.nions(), 5);
        assert_eq!(comp.ion_ranges(), vec![0 .. 2, 2 .. 5]);
    }

    #[test]
    fn test_parse_vasp4() {
        let txt = CONTCAR.lines()
            .enumerate()
            .filter(|(i, _)| *i != 5)
            .map(|(_, l)| l)
            .collect::<Vec<_>>()
            .join("\n");
        let comp = txt.parse::<Composition>().unwrap();
        assert_eq!(comp.ion_types(), vec!["X1", "X2"]);
        assert_eq!(comp.ions_per_type(), vec![2, 3]);
    }

    #[test]
    fn test_parse_failed() {
        assert!(CONTCAR.replace("     2     3", "     2").parse::<Composition>().is_err());
        assert!(CONTCAR.replace("     2     3", "     2     x").parse::<Composition>().is_err());
        assert!("Ga\n1.0\n".parse::<Composition>().is_err());
    }
}
