use crate::{Ceil, ChassisMod, EquipmentFlags, Finding, FindingCode, Location, MovementMode, TechLevel, TestEntityOption, UnitCategory};
use crate::armor::ArmorType;
use crate::bays::BayData;
use crate::engine::Engine;
use crate::jump_jets;
use crate::placement;
use crate::rounding;
use crate::structure::{Structure, SupportVeeStructure};
use crate::unit::{TankData, TurretConfig, Unit};

use super::{UnitWeightModel, WEIGHT_EPSILON};

use tracing::debug;

use std::borrow::Cow;
use std::collections::HashSet;

// TestTank {{{1
/// Construction rules for combat and support vehicles.
///
pub struct TestTank<'a> {
    unit: &'a Unit,
    tank: &'a TankData,
    options: Cow<'a, TestEntityOption>,
}

impl<'a> TestTank<'a> { // {{{2
    /// Extra crew seats weigh half a ton each.
    const CREW_SEAT_WGT: f64 = 0.5;

    // new {{{3
    /// Small support vehicles track every weight to the kilogram.
    ///
    pub fn new(unit: &'a Unit, tank: &'a TankData, options: &'a TestEntityOption) -> Self {
        let options = if tank.is_support() && unit.tonnage < SupportVeeStructure::SMALL_TONNAGE {
            debug!(unit = %unit.name, ceil = %Ceil::Kilo, "small support vehicle");
            Cow::Owned(options.to_kilo())
        } else {
            Cow::Borrowed(options)
        };

        Self { unit, tank, options }
    }

    // is_small_support {{{3
    fn is_small_support(&self) -> bool {
        self.tank.is_support() && self.unit.tonnage < SupportVeeStructure::SMALL_TONNAGE
    }

    // max_tonnage {{{3
    /// Heaviest combat vehicle for a movement mode.
    ///
    pub fn max_tonnage(movement: MovementMode, superheavy: bool) -> f64 {
        let (normal, heavy) = match movement {
            MovementMode::Wheeled |
            MovementMode::Wige      => (80.0, 160.0),
            MovementMode::Hover     => (50.0, 100.0),
            MovementMode::Vtol      => (30.0, 60.0),
            MovementMode::Naval |
            MovementMode::Submarine => (300.0, 555.0),
            MovementMode::Hydrofoil => (100.0, 100.0),
            _                       => (100.0, 200.0),
        };

        if superheavy { heavy } else { normal }
    }

    // max_armor {{{3
    /// Most armor points a combat vehicle may carry.
    ///
    pub fn max_armor(tonnage: f64) -> u32 {
        (tonnage * 7.0 / 2.0).floor() as u32 + 40
    }

    // total_slots {{{3
    /// Item slots available.
    ///
    pub fn total_slots(tonnage: f64, superheavy: bool) -> u32 {
        if superheavy {
            7 + (tonnage / 10.0).floor() as u32
        } else {
            5 + (tonnage / 5.0).floor() as u32
        }
    }

    // used_slots {{{3
    /// Item slots taken by equipment, armor and turrets.
    ///
    /// Ammunition takes one slot per type and all jump jets share one.
    ///
    pub fn used_slots(&self) -> u32 {
        let unit = self.unit;

        let equipment: u32 = unit.equipment.iter()
            .filter(|m| ! m.is_ammo() && ! m.has(EquipmentFlags::JumpJet))
            .map(|m| m.slots)
            .sum();

        let ammo_types = unit.equipment.iter()
            .filter(|m| m.is_ammo())
            .map(|m| m.name.as_str())
            .collect::<HashSet<_>>()
            .len() as u32;

        let jump_jets = if unit.has_flag(EquipmentFlags::JumpJet) { 1 } else { 0 };

        let turrets = [Location::Turret, Location::Turret2].into_iter()
            .filter(|loc| unit.equipment_at(*loc).next().is_some())
            .count() as u32;

        equipment + ammo_types + jump_jets + unit.armor.slots() + turrets
    }

    // turret_contents {{{3
    fn turret_contents(&self, loc: Location) -> f64 {
        self.unit.equipment_at(loc)
            .filter(|m| ! m.is_ammo())
            .map(|m| m.tonnage)
            .sum()
    }

    // computed_turret_wgt {{{3
    /// Turret weight from what it holds, ignoring any omni base chassis.
    ///
    pub fn computed_turret_wgt(&self, loc: Location) -> f64 {
        rounding::ceil(self.turret_contents(loc) / 10.0, self.options.ceil_turret)
    }

    // turret_wgt {{{3
    fn turret_wgt(&self, loc: Location, base_chassis: Option<f64>) -> f64 {
        match base_chassis {
            Some(wgt) if self.tank.omni => wgt,
            _ => self.computed_turret_wgt(loc),
        }
    }

    // illegal_combinations {{{3
    fn illegal_combinations(&self) -> Vec<Finding> {
        let unit = self.unit;
        let tank = self.tank;
        let mut findings = Vec::new();
        let mut illegal = |message: String| findings.push(Finding::error(FindingCode::IllegalCombination, message));

        if tank.omni {
            for (loc, base) in [(Location::Turret, tank.base_chassis_turret_weight), (Location::Turret2, tank.base_chassis_turret2_weight)] {
                if let Some(base) = base {
                    let computed = self.computed_turret_wgt(loc);
                    if computed > base + WEIGHT_EPSILON {
                        illegal(format!("{} equipment needs {} tons of turret, base chassis has {}", loc, computed, base));
                    }
                }
            }
        }

        if unit.movement == MovementMode::Vtol && tank.turret == TurretConfig::Dual {
            illegal("VTOLs cannot mount dual turrets".to_string());
        }

        if unit.count_flag(EquipmentFlags::MastMount) > 1 {
            illegal("Only one mast mount allowed".to_string());
        }

        if unit.count_flag(EquipmentFlags::TargetingComputer) > 1 {
            illegal("Only one targeting computer allowed".to_string());
        }

        let amphibious_chassis = tank.support
            .map(|s| s.mods.contains(ChassisMod::Amphibious))
            .unwrap_or(false);
        if unit.has_flag(EquipmentFlags::FlotationHull) &&
            (amphibious_chassis || unit.equipment.iter().any(|m| m.flags.is_amphibious()))
        {
            illegal("Flotation hull cannot be combined with amphibious modifications".to_string());
        }

        if unit.movement == MovementMode::Vtol && unit.armor.has_kind(ArmorType::Hardened) {
            illegal(format!("VTOLs cannot use {} armor", ArmorType::Hardened));
        }

        for m in unit.equipment.iter() {
            let Some(link) = m.linked_by else { continue; };

            match unit.equipment.get(link) {
                Some(capacitor) if capacitor.has(EquipmentFlags::PpcCapacitor) => {
                    if ! m.has(EquipmentFlags::Ppc) {
                        illegal(format!("{} is linked to {} but is not a PPC", m.name, capacitor.name));
                    }
                },
                Some(other) => illegal(format!("{} is linked to {}, which is not a PPC capacitor", m.name, other.name)),
                None => illegal(format!("{} is linked to missing equipment #{}", m.name, link)),
            }
        }

        if tank.is_support() {
            let industrial = jump_jets::all_jjs(true);
            for m in unit.equipment.iter().filter(|m| m.has(EquipmentFlags::JumpJet)) {
                if ! industrial.contains(&m.name.as_str()) {
                    illegal(format!("Support vehicles cannot mount {}", m.name));
                }
            }
        }

        findings
    }

    // check_bays {{{3
    /// Vehicles may carry every catalog bay, so only the rules level is
    /// checked. Crew quarters have no catalog entry.
    ///
    fn check_bays(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        for bay in self.tank.bays.iter() {
            let Some(data) = BayData::classify(bay) else { continue; };

            if data.tech().level > self.unit.tech_level {
                findings.push(Finding::error(FindingCode::IllegalTechLevel,
                    format!("{} bay is {} tech, above {}", data, data.tech().level, self.unit.tech_level)
                ));
            }
        }

        findings
    }

    // check_locations {{{3
    fn check_locations(&self) -> Vec<Finding> {
        let unit = self.unit;
        let tank = self.tank;
        let mut findings = Vec::new();

        for m in unit.equipment.iter() {
            let Some(loc) = m.location else { continue; };

            let turret_missing = match loc {
                Location::Turret  => tank.turret.count() < 1,
                Location::Turret2 => tank.turret.count() < 2,
                _ => false,
            };

            if turret_missing {
                findings.push(Finding::error(FindingCode::IllegalCombination,
                    format!("{} is mounted in the {} but the vehicle has no such turret", m.name, loc)
                ));
            } else if ! placement::is_valid_tank_location(m, loc, unit.movement, tank.turret, tank.superheavy) {
                findings.push(Finding::error(FindingCode::InvalidLocation,
                    format!("{} cannot be mounted in the {}", m.name, loc)
                ));
            }
        }

        findings
    }
}

impl UnitWeightModel for TestTank<'_> { // {{{2
    fn unit(&self) -> &Unit { self.unit }
    fn options(&self) -> &TestEntityOption { &self.options }
    fn category(&self) -> UnitCategory { UnitCategory::Tank }

    // wgt_structure {{{3
    fn wgt_structure(&self) -> f64 {
        match self.tank.support {
            Some(support) => support.wgt(self.unit.tonnage),
            None => Structure::new(self.unit.structure, self.tank.superheavy, self.unit.movement)
                .wgt(self.unit.tonnage, self.options.ceil_structure),
        }
    }

    // wgt_engine {{{3
    fn wgt_engine(&self) -> f64 {
        self.unit.engine
            .map(|e| e.wgt(true, self.options.ceil_engine))
            .unwrap_or(0.0)
    }

    // wgt_controls {{{3
    fn wgt_controls(&self) -> f64 {
        if self.tank.no_control_systems { return 0.0; }

        rounding::ceil_max_half(self.unit.tonnage / 20.0, self.options.ceil_controls)
    }

    // wgt_heat_sinks {{{3
    /// Energy weapon heat beyond what the engine sinks for free.
    ///
    fn wgt_heat_sinks(&self) -> f64 {
        let heat: u32 = self.unit.equipment.iter()
            .filter(|m| m.is_weapon() && m.has(EquipmentFlags::Energy))
            .map(|m| m.heat)
            .sum();

        let free = self.unit.engine.map(|e| e.free_heat_sinks()).unwrap_or(0);

        heat.saturating_sub(free) as f64
    }

    // wgt_power_amp {{{3
    fn wgt_power_amp(&self) -> f64 {
        let unit = self.unit;

        if self.is_small_support() { return 0.0; }
        if unit.engine.map(|e| e.kind.needs_shielding()).unwrap_or(false) { return 0.0; }

        let mut wgt = 0.0;
        for m in unit.equipment.iter() {
            if m.is_amplified() {
                wgt += m.tonnage;

                let capacitor = m.linked_by
                    .and_then(|i| unit.equipment.get(i))
                    .filter(|c| c.has(EquipmentFlags::PpcCapacitor));
                if let Some(capacitor) = capacitor {
                    wgt += capacitor.tonnage;
                }
            }

            if m.has(EquipmentFlags::SpotWelder) {
                wgt += m.tonnage;
            }
        }

        rounding::ceil(wgt / 10.0, self.options.ceil_power_amp)
    }

    // wgt_turret {{{3
    fn wgt_turret(&self) -> f64 {
        if self.tank.turret.count() < 1 { return 0.0; }

        self.turret_wgt(Location::Turret, self.tank.base_chassis_turret_weight)
    }

    // wgt_dual_turret {{{3
    fn wgt_dual_turret(&self) -> f64 {
        if self.tank.turret.count() < 2 { return 0.0; }

        self.turret_wgt(Location::Turret2, self.tank.base_chassis_turret2_weight)
    }

    // wgt_lifting {{{3
    fn wgt_lifting(&self) -> f64 {
        match self.unit.movement {
            MovementMode::Hover |
            MovementMode::Vtol |
            MovementMode::Hydrofoil |
            MovementMode::Submarine |
            MovementMode::Wige =>
                rounding::ceil_max_half(self.unit.tonnage / 10.0, self.options.ceil_lifting),

            _ => 0.0,
        }
    }

    // wgt_carrying_space {{{3
    fn wgt_carrying_space(&self) -> f64 {
        let bays: f64 = self.tank.bays.iter().map(|b| b.wgt()).sum();

        bays + self.tank.infantry_compartment + self.tank.extra_crew_seats as f64 * Self::CREW_SEAT_WGT
    }

    // correct_entity {{{3
    fn correct_entity(&self, ammo_tech_level: TechLevel) -> Vec<Finding> {
        let unit = self.unit;
        let tank = self.tank;
        let options = &self.options;
        let mut findings = self.correct_weight();

        // Engine
        findings.extend(super::check_engine(unit, false));
        if let (Some(engine), false) = (unit.engine, tank.is_support()) {
            if tank.cruise_mp > 0 {
                let suspension = Engine::suspension_factor(unit.movement, unit.tonnage);
                let needed = Engine::tank_rating(unit.tonnage, tank.cruise_mp, suspension);
                if engine.rating != needed {
                    findings.push(Finding::error(FindingCode::EngineInvalid, format!(
                        "{} engine does not match cruise MP {}, which needs a rating of {}",
                        engine, tank.cruise_mp, needed,
                    )));
                }
            }
        }

        // Slots
        if options.show_correct_criticals {
            let total = Self::total_slots(unit.tonnage, tank.superheavy);
            let used = self.used_slots();
            if used > total {
                findings.push(Finding::error(FindingCode::SlotsExceeded,
                    format!("{} item slots used, only {} available", used, total)
                ));
            }
        }

        // Tonnage and armor caps
        if ! tank.is_support() {
            let max = Self::max_tonnage(unit.movement, tank.superheavy);
            if unit.tonnage > max {
                findings.push(Finding::error(FindingCode::TonnageExceeded,
                    format!("{} {} vehicles may not exceed {} tons", unit.tonnage, unit.movement, max)
                ));
            }

            if options.show_correct_armor {
                let max = Self::max_armor(unit.tonnage);
                let points = unit.armor.total_points();
                if points > max {
                    findings.push(Finding::error(FindingCode::ArmorExceeded,
                        format!("{} armor points exceeds the maximum of {}", points, max)
                    ));
                }
            }
        }

        // Motive
        for m in unit.equipment.iter() {
            if ! placement::legal_for_motive_type(m, unit.movement, tank.is_support()) {
                findings.push(Finding::error(FindingCode::MotiveIncompatible,
                    format!("{} cannot be mounted on a {} vehicle", m.name, unit.movement)
                ));
            }
        }

        findings.extend(self.illegal_combinations());
        findings.extend(self.check_bays());
        findings.extend(super::check_tech_level(unit, ammo_tech_level));
        findings.extend(super::check_intro_year(unit, options));
        findings.extend(super::check_failed_equipment(unit, options));
        findings.extend(super::check_unallocated(unit));

        if options.show_correct_criticals {
            findings.extend(self.check_locations());
        }

        findings
    }
}
