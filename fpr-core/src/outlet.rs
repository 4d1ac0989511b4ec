use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A discharge route past the dam.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlet {
    Spillway,
    Turbine,
    RegulatingOutlet,
    /// Fish passage structure
    Fps,
}

impl Outlet {
    pub const ALL: [Outlet; 4] = [
        Outlet::Spillway,
        Outlet::Turbine,
        Outlet::RegulatingOutlet,
        Outlet::Fps,
    ];
}

impl fmt::Display for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlet::Spillway => write!(f, "spillway"),
            Outlet::Turbine => write!(f, "turbine"),
            Outlet::RegulatingOutlet => write!(f, "regulating outlet"),
            Outlet::Fps => write!(f, "fish passage structure"),
        }
    }
}

/// One value per outlet: flows, flow shares, effectiveness or proportions.
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
pub struct OutletValues {
    pub spill: f64,
    pub turb: f64,
    pub ro: f64,
    pub fps: f64,
}

impl OutletValues {
    pub fn new(spill: f64, turb: f64, ro: f64, fps: f64) -> Self {
        OutletValues {
            spill,
            turb,
            ro,
            fps,
        }
    }

    pub fn from_fn<F: FnMut(Outlet) -> f64>(mut f: F) -> Self {
        OutletValues {
            spill: f(Outlet::Spillway),
            turb: f(Outlet::Turbine),
            ro: f(Outlet::RegulatingOutlet),
            fps: f(Outlet::Fps),
        }
    }

    pub fn map<F: FnMut(Outlet, f64) -> f64>(&self, mut f: F) -> Self {
        OutletValues::from_fn(|outlet| f(outlet, self[outlet]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outlet, f64)> + '_ {
        Outlet::ALL.iter().map(move |outlet| (*outlet, self[*outlet]))
    }

    pub fn sum(&self) -> f64 {
        self.spill + self.turb + self.ro + self.fps
    }
}

impl Index<Outlet> for OutletValues {
    type Output = f64;

    fn index(&self, outlet: Outlet) -> &f64 {
        match outlet {
            Outlet::Spillway => &self.spill,
            Outlet::Turbine => &self.turb,
            Outlet::RegulatingOutlet => &self.ro,
            Outlet::Fps => &self.fps,
        }
    }
}
