pub mod error;
pub mod types;
pub mod settings;
pub mod vasp_parsers;
pub mod gap;
pub mod dos;
pub mod contrib;
pub mod kpath;
pub mod ticks;
pub mod session;
pub mod commands;
pub mod cli;

pub use types::Result;
pub use cli::OptProcess;

pub use error::Error;

pub use vasp_parsers::{
    procar::ElectronicDataset,
    poscar::Composition,
    kpoints::{
        kpoints_listing,
        read_mesh,
        write_mesh,
    },
};

pub use gap::BandGap;

pub use dos::{
    BinEdges,
    EnergyWindow,
    EnergyHistogram,
};

pub use contrib::{
    ChannelSet,
    Contributions,
};

pub use kpath::{
    Bravais,
    KPath,
    LatticeParameters,
};

pub use ticks::{
    PathAxis,
    Tick,
};

pub use session::{
    Session,
    SessionFiles,
};

pub use settings::Settings;
