use crate::{Finding, FindingCode, MovementMode, TechLevel, TestEntityOption, UnitCategory};
use crate::unit::{InfantryData, InfantryMount, InfantrySpecialization, Unit};

use super::UnitWeightModel;

// TestInfantry {{{1
/// Platoon organization rules for conventional infantry.
///
/// Infantry weight comes from the troopers and their kit, so the declared
/// tonnage is taken as given and carried as structure.
///
pub struct TestInfantry<'a> {
    unit: &'a Unit,
    infantry: &'a InfantryData,
    options: &'a TestEntityOption,
}

impl<'a> TestInfantry<'a> { // {{{2
    /// Engineers and mountain troops never field more than this.
    pub const SPECIALIST_UNIT_SIZE: u32 = 20;

    pub fn new(unit: &'a Unit, infantry: &'a InfantryData, options: &'a TestEntityOption) -> Self {
        Self { unit, infantry, options }
    }

    // max_secondary_weapons {{{3
    /// Secondary weapons each squad may carry.
    ///
    pub fn max_secondary_weapons(infantry: &InfantryData, movement: MovementMode) -> u32 {
        let base = match (&infantry.mount, movement) {
            (Some(mount), _) => mount.support_weapons_per_creature() as i32,
            (None, MovementMode::Vtol | MovementMode::InfUmu) => if infantry.alt_mode { 0 } else { 1 },
            (None, _) => 2,
        };

        let mut max = base + infantry.augmentations.secondary_modifier();
        if infantry.specializations.contains(InfantrySpecialization::TagTroops) {
            max -= 1;
        }

        max.max(0) as u32
    }

    // max_squad_size {{{3
    pub fn max_squad_size(movement: MovementMode, alt: bool, mount: Option<&InfantryMount>) -> u32 {
        if let Some(mount) = mount {
            return match mount.troops_per_creature() {
                troops if troops > 1 => troops,
                _ => mount.creatures_per_platoon(),
            };
        }

        match movement {
            MovementMode::Hover |
            MovementMode::Submarine => 5,
            MovementMode::Wheeled   => 6,
            MovementMode::Tracked   => 7,
            MovementMode::InfUmu    => if alt { 6 } else { 10 },
            MovementMode::Vtol      => if alt { 2 } else { 4 },
            _                       => 10,
        }
    }

    // max_unit_size {{{3
    /// Most troopers in a platoon.
    ///
    pub fn max_unit_size(
        movement: MovementMode,
        alt: bool,
        eng_or_mountain: bool,
        mount: Option<&InfantryMount>,
    ) -> u32 {
        let max = match (mount, movement) {
            (Some(mount), _) => mount.troops_per_creature() * mount.creatures_per_platoon(),

            (None, MovementMode::InfUmu)    => if alt { 12 } else { 30 },
            (None, MovementMode::Hover |
                   MovementMode::Submarine) => 20,
            (None, MovementMode::Wheeled)   => 24,
            (None, MovementMode::Tracked)   => 28,
            (None, MovementMode::Vtol)      => Self::max_squad_size(movement, alt, None) * 4,
            (None, _)                       => 30,
        };

        if eng_or_mountain { max.min(Self::SPECIALIST_UNIT_SIZE) } else { max }
    }

    // check_organization {{{3
    fn check_organization(&self) -> Vec<Finding> {
        let infantry = self.infantry;
        let movement = self.unit.movement;
        let mount = infantry.mount.as_ref();
        let mut findings = Vec::new();
        let mut problem = |message: String| findings.push(Finding::error(FindingCode::InfantryOrganization, message));

        if infantry.squad_size == 0 || infantry.squads == 0 {
            problem(format!("{} squads of {} troopers is not a platoon", infantry.squads, infantry.squad_size));
        }

        let max = Self::max_secondary_weapons(infantry, movement);
        if infantry.secondary_weapons > max {
            problem(format!("{} secondary weapons per squad exceeds the maximum of {}", infantry.secondary_weapons, max));
        }

        let crew = infantry.secondary_weapons.saturating_mul(infantry.secondary_crew);
        if crew > infantry.squad_size {
            problem(format!("Secondary weapons need {} troopers but squads have {}", crew, infantry.squad_size));
        }

        let max = Self::max_squad_size(movement, infantry.alt_mode, mount);
        if infantry.squad_size > max {
            problem(format!("Squad size {} exceeds the maximum of {}", infantry.squad_size, max));
        }

        let max = Self::max_unit_size(movement, infantry.alt_mode, infantry.is_engineer_or_mountain(), mount);
        if infantry.troopers() > max {
            problem(format!("{} troopers exceeds the maximum of {}", infantry.troopers(), max));
        }

        findings
    }
}

impl UnitWeightModel for TestInfantry<'_> { // {{{2
    fn unit(&self) -> &Unit { self.unit }
    fn options(&self) -> &TestEntityOption { self.options }
    fn category(&self) -> UnitCategory { UnitCategory::Infantry }

    fn wgt_structure(&self) -> f64 { self.unit.tonnage }
    fn wgt_engine(&self) -> f64 { 0.0 }
    fn wgt_controls(&self) -> f64 { 0.0 }
    fn wgt_heat_sinks(&self) -> f64 { 0.0 }
    fn wgt_armor(&self) -> f64 { 0.0 }
    fn wgt_equipment(&self) -> f64 { 0.0 }

    // correct_entity {{{3
    fn correct_entity(&self, ammo_tech_level: TechLevel) -> Vec<Finding> {
        let unit = self.unit;

        let mut findings = self.check_organization();
        findings.extend(super::check_tech_level(unit, ammo_tech_level));
        findings.extend(super::check_intro_year(unit, self.options));
        findings.extend(super::check_failed_equipment(unit, self.options));

        findings
    }
}
