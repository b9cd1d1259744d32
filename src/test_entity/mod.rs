use crate::{EquipmentFlags, Finding, FindingCode, TechBase, TechLevel, TestEntityOption, UnitCategory, Verdict, WeightBreakdown};
use crate::rounding;
use crate::unit::{Unit, UnitKind};

use format_num::format_num;
use tracing::{debug, trace, warn};

pub mod building;
pub mod infantry;
pub mod protomech;
pub mod tank;

pub use building::TestBuilding;
pub use infantry::TestInfantry;
pub use protomech::TestProtomech;
pub use tank::TestTank;

/// Weight differences smaller than this are treated as equal.
const WEIGHT_EPSILON: f64 = 1e-6;

// for_unit {{{1
/// Select the rules variant for a unit's category.
///
pub fn for_unit<'a>(unit: &'a Unit, options: &'a TestEntityOption) -> Box<dyn UnitWeightModel + 'a> {
    match &unit.kind {
        UnitKind::Tank(data)      => Box::new(TestTank::new(unit, data, options)),
        UnitKind::Infantry(data)  => Box::new(TestInfantry::new(unit, data, options)),
        UnitKind::Protomech(data) => Box::new(TestProtomech::new(unit, data, options)),
        UnitKind::Building(data)  => Box::new(TestBuilding::new(unit, data, options)),
    }
}

// UnitWeightModel {{{1
/// Weight calculation and legality checks for one category of unit.
///
/// Every weight is in tons, already rounded the way the category requires.
///
pub trait UnitWeightModel {
    fn unit(&self) -> &Unit;
    fn options(&self) -> &TestEntityOption;
    fn category(&self) -> UnitCategory;

    // Category predicates {{{2
    fn is_tank(&self) -> bool { self.category() == UnitCategory::Tank }
    fn is_mech(&self) -> bool { self.category() == UnitCategory::Mek }
    fn is_aero(&self) -> bool { self.category() == UnitCategory::Aero }
    fn is_small_craft(&self) -> bool { self.category() == UnitCategory::SmallCraft }
    fn is_advanced_aerospace(&self) -> bool { self.category() == UnitCategory::AdvancedAerospace }
    fn is_protomech(&self) -> bool { self.category() == UnitCategory::Protomech }
    fn is_infantry(&self) -> bool { self.category() == UnitCategory::Infantry }
    fn is_building(&self) -> bool { self.category() == UnitCategory::Building }

    // Weights {{{2
    fn wgt_structure(&self) -> f64;
    fn wgt_engine(&self) -> f64;
    fn wgt_controls(&self) -> f64;
    fn wgt_heat_sinks(&self) -> f64;

    fn wgt_armor(&self) -> f64 {
        self.unit().armor.wgt(self.options().ceil_armor)
    }

    fn wgt_power_amp(&self) -> f64 { 0.0 }
    fn wgt_turret(&self) -> f64 { 0.0 }
    fn wgt_dual_turret(&self) -> f64 { 0.0 }
    fn wgt_lifting(&self) -> f64 { 0.0 }
    fn wgt_carrying_space(&self) -> f64 { 0.0 }

    /// Turrets and lift equipment.
    ///
    fn wgt_misc(&self) -> f64 {
        self.wgt_turret() + self.wgt_dual_turret() + self.wgt_lifting()
    }

    fn wgt_equipment(&self) -> f64 {
        wgt_equipment(self.unit(), self.options())
    }

    // breakdown {{{2
    fn breakdown(&self) -> WeightBreakdown {
        WeightBreakdown {
            structure:      self.wgt_structure(),
            engine:         self.wgt_engine(),
            controls:       self.wgt_controls(),
            armor:          self.wgt_armor(),
            heat_sinks:     self.wgt_heat_sinks(),
            power_amp:      self.wgt_power_amp(),
            turret:         self.wgt_turret(),
            dual_turret:    self.wgt_dual_turret(),
            lifting:        self.wgt_lifting(),
            equipment:      self.wgt_equipment(),
            carrying_space: self.wgt_carrying_space(),
        }
    }

    // calculate_weight {{{2
    fn calculate_weight(&self) -> f64 {
        self.breakdown().total()
    }

    // correct_weight {{{2
    /// Compare the computed weight with the declared tonnage.
    ///
    fn correct_weight(&self) -> Vec<Finding> {
        check_weight(self.calculate_weight(), self.unit().tonnage, self.options())
    }

    // correct_entity {{{2
    /// Every rule violation found, in the order the rules are checked.
    ///
    fn correct_entity(&self, ammo_tech_level: TechLevel) -> Vec<Finding>;

    // verify {{{2
    fn verify(&self, ammo_tech_level: TechLevel) -> Verdict {
        let unit = self.unit();

        if self.options().skip {
            warn!(unit = %unit.name, "verification skipped");
            return Verdict::unchecked(
                vec![Finding::notice(FindingCode::NotImplemented, "Verification skipped")],
                self.breakdown(),
                unit.tonnage,
            );
        }

        let breakdown = self.breakdown();
        debug!(unit = %unit.name, category = %self.category(), ?breakdown, "weights");

        let findings = self.correct_entity(ammo_tech_level);
        for finding in findings.iter() {
            trace!(unit = %unit.name, %finding, "rule");
        }

        let verdict = Verdict::new(findings, breakdown, unit.tonnage);
        debug!(unit = %unit.name, outcome = %verdict.outcome, total = verdict.total, "verdict");

        verdict
    }
}

// Shared checks {{{1
// wgt_targeting_computer {{{2
/// Weight of a targeting computer, which depends on the direct fire
/// weapons it serves.
///
pub fn wgt_targeting_computer(unit: &Unit, options: &TestEntityOption) -> f64 {
    let Some(tc) = unit.equipment.iter().find(|m| m.has(EquipmentFlags::TargetingComputer)) else {
        return 0.0;
    };

    let direct_fire: f64 = unit.equipment.iter()
        .filter(|m| m.is_weapon() && m.has(EquipmentFlags::DirectFire))
        .map(|m| m.tonnage)
        .sum();

    let divisor = if tc.tech.base == TechBase::Clan { 5.0 } else { 4.0 };

    rounding::ceil(direct_fire / divisor, options.ceil_target_computer)
}

// wgt_equipment {{{2
/// Weight of all mounted equipment, with the targeting computer sized to
/// the weapons it serves.
///
pub fn wgt_equipment(unit: &Unit, options: &TestEntityOption) -> f64 {
    let wgt: f64 = unit.equipment.iter()
        .filter(|m| ! m.has(EquipmentFlags::TargetingComputer))
        .map(|m| m.tonnage)
        .sum();

    rounding::ceil_max_half(wgt, options.ceil_weapons) + wgt_targeting_computer(unit, options)
}

// check_weight {{{2
/// Computed weight against declared tonnage, within tolerance.
///
pub fn check_weight(computed: f64, declared: f64, options: &TestEntityOption) -> Vec<Finding> {
    let mut findings = Vec::new();

    if options.show_overweight && computed > declared * (1.0 + options.max_overweight) + WEIGHT_EPSILON {
        findings.push(Finding::error(FindingCode::Overweight, format!(
            "Weight {} tons is greater than {} tons",
            format_num!(",.3f", computed),
            format_num!(",.3f", declared),
        )));
    }

    if options.show_underweight && computed < declared * (1.0 - options.max_underweight) - WEIGHT_EPSILON {
        findings.push(Finding::error(FindingCode::Underweight, format!(
            "Weight {} tons is less than {} tons",
            format_num!(",.3f", computed),
            format_num!(",.3f", declared),
        )));
    }

    findings
}

// check_engine {{{2
/// Engine presence and rating.
///
pub fn check_engine(unit: &Unit, protomech: bool) -> Vec<Finding> {
    match unit.engine {
        None => vec![Finding::error(FindingCode::EngineInvalid, "No engine")],
        Some(engine) => engine.problems(protomech)
            .into_iter()
            .map(|p| Finding::error(FindingCode::EngineInvalid, p))
            .collect(),
    }
}

// check_tech_level {{{2
/// Equipment above the unit's rules level or outside its tech base.
/// Ammunition is held to `ammo_tech_level` instead.
///
pub fn check_tech_level(unit: &Unit, ammo_tech_level: TechLevel) -> Vec<Finding> {
    let mut findings = Vec::new();

    for m in unit.equipment.iter() {
        let limit = if m.is_ammo() { ammo_tech_level } else { unit.tech_level };

        if m.tech.level > limit {
            findings.push(Finding::error(FindingCode::IllegalTechLevel,
                format!("{} is {} tech, above {}", m.name, m.tech.level, limit)
            ));
        }

        if ! unit.tech_base.allows(m.tech.base) {
            findings.push(Finding::error(FindingCode::IllegalTechLevel,
                format!("{} is {} tech on a {} unit", m.name, m.tech.base, unit.tech_base)
            ));
        }
    }

    findings
}

// check_intro_year {{{2
/// Equipment introduced after the unit, beyond the allowed margin.
///
pub fn check_intro_year(unit: &Unit, options: &TestEntityOption) -> Vec<Finding> {
    if ! options.show_incorrect_intro_year { return Vec::new(); }

    unit.equipment.iter()
        .filter(|m| m.tech.intro_year > unit.year + options.intro_year_margin)
        .map(|m| Finding::error(FindingCode::IntroYear,
            format!("{} was introduced in {}, after {}", m.name, m.tech.intro_year, unit.year)
        ))
        .collect()
}

// check_failed_equipment {{{2
/// Equipment that could not be resolved, less the ignored names.
///
pub fn check_failed_equipment(unit: &Unit, options: &TestEntityOption) -> Vec<Finding> {
    if ! options.show_failed_equip { return Vec::new(); }

    unit.failed_equipment.iter()
        .filter(|name| ! options.ignores_failed(name))
        .map(|name| Finding::error(FindingCode::FailedEquipment, format!("{} failed to load", name)))
        .collect()
}

// check_unallocated {{{2
/// Equipment that was never placed in a location.
///
pub fn check_unallocated(unit: &Unit) -> Vec<Finding> {
    unit.equipment.iter()
        .filter(|m| m.location.is_none())
        .map(|m| Finding::error(FindingCode::Unallocated, format!("{} is not allocated", m.name)))
        .collect()
}

// Testing {{{1
#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Location, TechAdvancement, TechBase, TechLevel};
    use crate::unit::{EquipmentKind, Mounted, Unit, UnitKind};

    /// A bare unit for rule tests.
    ///
    pub fn unit(tonnage: f64, kind: UnitKind) -> Unit {
        Unit {
            name: "Test".into(),
            year: 3050,
            tonnage,
            tech_base: TechBase::InnerSphere,
            tech_level: TechLevel::Standard,
            movement: Default::default(),
            engine: None,
            structure: Default::default(),
            armor: Default::default(),
            equipment: Vec::new(),
            failed_equipment: Vec::new(),
            kind,
        }
    }

    pub fn mounted(name: &str, kind: EquipmentKind, tonnage: f64, loc: Location) -> Mounted {
        Mounted {
            name: name.into(),
            kind,
            tonnage,
            slots: 1,
            location: Some(loc),
            tech: TechAdvancement::new(TechBase::All, TechLevel::Introductory, 2300),
            ..Default::default()
        }
    }
}
