use serde::{Serialize, Deserialize};

use std::fmt;

// WeightBreakdown {{{1
/// Computed weight of each construction category, in tons.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct WeightBreakdown {
    pub structure: f64,
    pub engine: f64,
    /// Controls or cockpit.
    pub controls: f64,
    pub armor: f64,
    pub heat_sinks: f64,
    pub power_amp: f64,
    pub turret: f64,
    pub dual_turret: f64,
    /// Lift and dive equipment.
    pub lifting: f64,
    /// Weapons, ammunition and other mounted equipment.
    pub equipment: f64,
    /// Bays, infantry compartments and extra crew seats.
    pub carrying_space: f64,
}

impl WeightBreakdown { // {{{2
    // misc {{{3
    /// Weight of everything that is not structure, engine, controls,
    /// armor or mounted equipment.
    ///
    pub fn misc(&self) -> f64 {
        self.heat_sinks + self.power_amp + self.turret + self.dual_turret +
            self.lifting + self.carrying_space
    }

    // total {{{3
    /// Total of all weights.
    ///
    pub fn total(&self) -> f64 {
        self.structure + self.engine + self.controls + self.armor +
            self.equipment + self.misc()
    }
}

impl fmt::Display for WeightBreakdown { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = [
            ("Structure",      self.structure),
            ("Engine",         self.engine),
            ("Controls",       self.controls),
            ("Armor",          self.armor),
            ("Heat Sinks",     self.heat_sinks),
            ("Power Amp",      self.power_amp),
            ("Turret",         self.turret),
            ("Dual Turret",    self.dual_turret),
            ("Lifting",        self.lifting),
            ("Equipment",      self.equipment),
            ("Carrying Space", self.carrying_space),
        ];

        for (name, wgt) in rows {
            writeln!(f, "{:<16}{:>10.3}", name, wgt)?;
        }
        write!(f, "{:<16}{:>10.3}", "Total", self.total())
    }
}
