use crate::{Finding, FindingCode, MovementMode, TechLevel, TestEntityOption, UnitCategory, Verdict};
use crate::structure::Structure;
use crate::unit::{BuildingData, Unit};

use super::UnitWeightModel;

use tracing::debug;

// TestBuilding {{{1
/// Buildings only get a structure weight. Their construction rules are not
/// checked, so they never pass.
///
pub struct TestBuilding<'a> {
    unit: &'a Unit,
    building: &'a BuildingData,
    options: &'a TestEntityOption,
}

impl<'a> TestBuilding<'a> { // {{{2
    pub fn new(unit: &'a Unit, building: &'a BuildingData, options: &'a TestEntityOption) -> Self {
        Self { unit, building, options }
    }
}

impl UnitWeightModel for TestBuilding<'_> { // {{{2
    fn unit(&self) -> &Unit { self.unit }
    fn options(&self) -> &TestEntityOption { self.options }
    fn category(&self) -> UnitCategory { UnitCategory::Building }

    fn wgt_structure(&self) -> f64 {
        Structure::new(self.unit.structure, false, MovementMode::None)
            .wgt(self.unit.tonnage, self.options.ceil_structure)
    }

    fn wgt_engine(&self) -> f64 { 0.0 }
    fn wgt_controls(&self) -> f64 { 0.0 }
    fn wgt_heat_sinks(&self) -> f64 { 0.0 }
    fn wgt_armor(&self) -> f64 { 0.0 }
    fn wgt_equipment(&self) -> f64 { 0.0 }

    fn correct_entity(&self, _ammo_tech_level: TechLevel) -> Vec<Finding> {
        vec![Finding::notice(FindingCode::NotImplemented,
            format!("Building rules are not checked ({} structure, CF {})", self.unit.structure, self.building.cf)
        )]
    }

    // verify {{{3
    fn verify(&self, ammo_tech_level: TechLevel) -> Verdict {
        let verdict = Verdict::unchecked(self.correct_entity(ammo_tech_level), self.breakdown(), self.unit.tonnage);
        debug!(unit = %self.unit.name, outcome = %verdict.outcome, "verdict");

        verdict
    }
}
