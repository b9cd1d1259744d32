use crate::{EquipmentFlags, Finding, FindingCode, Location, TechLevel, TestEntityOption, UnitCategory};
use crate::rounding;
use crate::unit::{ProtomechData, Unit};

use super::{UnitWeightModel, WEIGHT_EPSILON};

use tracing::trace;

// TestProtomech {{{1
/// ProtoMech construction rules. Every weight is tracked to the kilogram.
///
pub struct TestProtomech<'a> {
    unit: &'a Unit,
    proto: &'a ProtomechData,
    options: TestEntityOption,
}

impl<'a> TestProtomech<'a> { // {{{2
    /// Armor points by tonnage, starting at 2 tons.
    const MAX_ARMOR_FACTOR: [u32; 14] = [15, 17, 22, 24, 33, 35, 40, 42, 51, 53, 58, 60, 65, 67];
    /// Extra armor allowed with a main gun.
    const MAIN_GUN_ARMOR: u32 = 3;

    const COCKPIT_WGT: f64 = 0.5;
    const HEAT_SINK_WGT: f64 = 0.25;

    /// Locations with space for equipment.
    const LOCATIONS: [Location; 6] = [
        Location::Head,
        Location::Torso,
        Location::RightArm,
        Location::LeftArm,
        Location::Legs,
        Location::MainGun,
    ];

    pub fn new(unit: &'a Unit, proto: &'a ProtomechData, options: &TestEntityOption) -> Self {
        Self { unit, proto, options: options.to_kilo() }
    }

    // tonnage_range {{{3
    pub fn tonnage_range(ultraheavy: bool) -> (f64, f64) {
        if ultraheavy { (10.0, 15.0) } else { (2.0, 9.0) }
    }

    // minimum_walk_mp {{{3
    pub fn minimum_walk_mp(proto: &ProtomechData) -> u32 {
        if proto.glider {
            4
        } else if proto.quad {
            3
        } else {
            1
        }
    }

    // calc_engine_rating {{{3
    /// Rating needed for a walking speed. Ratings above 40 step by 5.
    ///
    pub fn calc_engine_rating(tonnage: f64, walk_mp: u32, quad: bool, glider: bool) -> u32 {
        let mut factor = (walk_mp as f64 * 1.5).ceil() as i64;
        if quad || glider {
            factor -= 2;
        }

        let rating = ((factor as f64 * tonnage).round() as i64).max(1) as u32;

        if rating > 40 { rating.div_ceil(5) * 5 } else { rating }
    }

    // max_slots_by_location {{{3
    pub fn max_slots_by_location(loc: Location, quad: bool, ultraheavy: bool) -> u32 {
        match loc {
            Location::Torso => match (quad, ultraheavy) {
                (true, true)   => 6,
                (true, false)  => 5,
                (false, true)  => 3,
                (false, false) => 2,
            },

            Location::RightArm |
            Location::LeftArm => match (quad, ultraheavy) {
                (true, _)     => 0,
                (false, true) => 2,
                _             => 1,
            },

            Location::MainGun => 1,
            _ => 0,
        }
    }

    // max_weight_by_location {{{3
    /// Tonnage a location can hold. The main gun has no limit.
    ///
    pub fn max_weight_by_location(loc: Location, quad: bool, ultraheavy: bool) -> Option<f64> {
        match loc {
            Location::Torso => Some(match (quad, ultraheavy) {
                (true, true)   => 8.0,
                (true, false)  => 5.0,
                (false, true)  => 4.0,
                (false, false) => 2.0,
            }),

            Location::RightArm |
            Location::LeftArm => Some(if ultraheavy { 1.0 } else { 0.5 }),

            Location::MainGun => None,
            _ => Some(0.0),
        }
    }

    // max_armor_factor {{{3
    pub fn max_armor_factor(tonnage: f64, main_gun: bool) -> u32 {
        let index = (tonnage.clamp(2.0, 15.0) as usize) - 2;
        let factor = Self::MAX_ARMOR_FACTOR[index];

        if main_gun { factor + Self::MAIN_GUN_ARMOR } else { factor }
    }

    // check_criticals {{{3
    fn check_criticals(&self) -> Vec<Finding> {
        let proto = self.proto;
        let mut findings = Vec::new();

        for loc in Self::LOCATIONS {
            let (slots, wgt) = self.unit.equipment_at(loc)
                .filter(|m| ! m.has(EquipmentFlags::ProtoSystem))
                .fold((0, 0.0), |(s, w), m| (s + m.slots, w + m.tonnage));
            trace!(%loc, slots, wgt, "location contents");

            let max_slots = Self::max_slots_by_location(loc, proto.quad, proto.ultraheavy);
            if slots > max_slots {
                findings.push(Finding::error(FindingCode::Criticals,
                    format!("{} holds {} items, only {} allowed", loc, slots, max_slots)
                ));
            }

            if let Some(max) = Self::max_weight_by_location(loc, proto.quad, proto.ultraheavy) {
                if wgt > max + WEIGHT_EPSILON {
                    findings.push(Finding::error(FindingCode::Criticals,
                        format!("{} holds {} tons, only {} allowed", loc, wgt, max)
                    ));
                }
            }
        }

        findings
    }

    // check_locations {{{3
    fn check_locations(&self) -> Vec<Finding> {
        let proto = self.proto;
        let mut findings = Vec::new();

        for m in self.unit.equipment.iter() {
            let Some(loc) = m.location else { continue; };

            let body_item = m.is_ammo() || m.has(EquipmentFlags::ProtoSystem);

            let problem = match loc {
                Location::Body if ! body_item =>
                    Some(FindingCode::InvalidLocation),
                _ if body_item && loc != Location::Body =>
                    Some(FindingCode::InvalidLocation),
                Location::Body =>
                    None,
                l if ! l.is_protomech() =>
                    Some(FindingCode::InvalidLocation),
                Location::RightArm | Location::LeftArm if proto.quad =>
                    Some(FindingCode::InvalidLocation),
                Location::MainGun if ! proto.main_gun =>
                    Some(FindingCode::IllegalCombination),
                Location::MainGun if ! m.is_weapon() =>
                    Some(FindingCode::InvalidLocation),
                _ => None,
            };

            if let Some(code) = problem {
                findings.push(Finding::error(code, format!("{} cannot be mounted in the {}", m.name, loc)));
            }
        }

        if proto.main_gun && ! self.unit.equipment_at(Location::MainGun).any(|m| m.is_weapon()) {
            findings.push(Finding::warning(FindingCode::IllegalCombination, "Main gun mounts no weapon"));
        }

        findings
    }
}

impl UnitWeightModel for TestProtomech<'_> { // {{{2
    fn unit(&self) -> &Unit { self.unit }
    fn options(&self) -> &TestEntityOption { &self.options }
    fn category(&self) -> UnitCategory { UnitCategory::Protomech }

    fn wgt_structure(&self) -> f64 {
        rounding::ceil(self.unit.tonnage * 0.1, self.options.ceil_structure)
    }

    fn wgt_engine(&self) -> f64 {
        self.unit.engine.map(|e| e.wgt_protomech()).unwrap_or(0.0)
    }

    fn wgt_controls(&self) -> f64 {
        Self::COCKPIT_WGT
    }

    fn wgt_heat_sinks(&self) -> f64 {
        self.proto.heat_sinks as f64 * Self::HEAT_SINK_WGT
    }

    // correct_entity {{{3
    fn correct_entity(&self, ammo_tech_level: TechLevel) -> Vec<Finding> {
        let unit = self.unit;
        let proto = self.proto;
        let options = &self.options;
        let mut findings = self.correct_weight();

        let (min, max) = Self::tonnage_range(proto.ultraheavy);
        if unit.tonnage < min || unit.tonnage > max {
            findings.push(Finding::error(FindingCode::TonnageExceeded,
                format!("ProtoMechs must weigh between {} and {} tons", min, max)
            ));
        }

        // Engine
        findings.extend(super::check_engine(unit, true));

        let min_walk = Self::minimum_walk_mp(proto);
        if proto.walk_mp < min_walk {
            findings.push(Finding::error(FindingCode::EngineInvalid,
                format!("Walk MP {} is below the minimum of {}", proto.walk_mp, min_walk)
            ));
        }

        if let Some(engine) = unit.engine {
            let needed = Self::calc_engine_rating(unit.tonnage, proto.walk_mp, proto.quad, proto.glider);
            if engine.rating != needed {
                findings.push(Finding::error(FindingCode::EngineInvalid, format!(
                    "Engine rating {} does not match walk MP {}, which needs {}",
                    engine.rating, proto.walk_mp, needed,
                )));
            }
        }

        for armor in unit.armor.locations.iter().filter(|a| ! a.kind.is_protomech()) {
            findings.push(Finding::error(FindingCode::IllegalCombination,
                format!("{} armor in the {} cannot be used on a ProtoMech", armor.kind, armor.location)
            ));
        }

        if options.show_correct_armor {
            let max = Self::max_armor_factor(unit.tonnage, proto.main_gun);
            let points = unit.armor.total_points();
            if points > max {
                findings.push(Finding::error(FindingCode::ArmorExceeded,
                    format!("{} armor points exceeds the maximum of {}", points, max)
                ));
            }
        }

        if options.show_correct_criticals {
            findings.extend(self.check_criticals());
        }

        findings.extend(self.check_locations());
        findings.extend(super::check_tech_level(unit, ammo_tech_level));
        findings.extend(super::check_intro_year(unit, options));
        findings.extend(super::check_failed_equipment(unit, options));
        findings.extend(super::check_unallocated(unit));

        findings
    }
}

// Testing {{{1
#[cfg(test)]
mod test_protomech {
    use super::*;
    use crate::{Ceil, Outcome, Severity};
    use crate::armor::{Armor, ArmorType, LocationArmor};
    use crate::engine::{Engine, EngineType};
    use crate::test_entity::test_support::*;
    use crate::unit::{EquipmentKind, UnitKind};

    fn data(unit: &Unit) -> &ProtomechData {
        match &unit.kind {
            UnitKind::Protomech(data) => data,
            _ => unreachable!(),
        }
    }

    /// A 5 ton biped that verifies cleanly.
    ///
    /// Structure 0.5, engine 0.75, cockpit 0.5, heat sinks 0.5, armor 1,
    /// equipment 1.75.
    ///
    fn legal_proto() -> Unit {
        let mut unit = unit(5.0, UnitKind::Protomech(ProtomechData {
            walk_mp: 4,
            heat_sinks: 2,
            ..Default::default()
        }));
        unit.engine = Some(Engine::new(EngineType::Fusion, 30));
        unit.armor = Armor { locations: vec![
            LocationArmor { location: Location::Torso, kind: ArmorType::ProtomechStandard, clan: true, points: 12 },
            LocationArmor { location: Location::Legs, kind: ArmorType::ProtomechStandard, clan: true, points: 8 },
        ]};
        unit.equipment = vec![
            mounted("ER Medium Laser", EquipmentKind::Weapon, 1.0, Location::Torso),
            mounted("Micro Pulse Laser", EquipmentKind::Weapon, 0.5, Location::RightArm),
            mounted("SRM 2 Ammo", EquipmentKind::Ammo, 0.25, Location::Body),
        ];
        unit
    }

    #[test]
    fn legal_proto_passes() {
        let unit = legal_proto();
        let options = TestEntityOption::default();
        let test = TestProtomech::new(&unit, data(&unit), &options);

        assert_eq!(Ceil::Kilo, test.options().ceil_armor);

        let breakdown = test.breakdown();
        assert_eq!(0.5, breakdown.structure);
        assert_eq!(0.75, breakdown.engine);
        assert_eq!(0.5, breakdown.controls);
        assert_eq!(0.5, breakdown.heat_sinks);
        assert_eq!(1.0, breakdown.armor);
        assert_eq!(1.75, breakdown.equipment);

        let verdict = test.verify(TechLevel::Standard);
        assert_eq!(Vec::<Finding>::new(), verdict.findings);
        assert_eq!(Outcome::Pass, verdict.outcome);
    }

    #[test]
    fn findings_accumulate() {
        let mut unit = legal_proto();
        unit.tonnage = 10.0;
        unit.equipment.push(mounted("Heavy Thing", EquipmentKind::Misc, 0.5, Location::LeftArm));
        unit.equipment.push(mounted("Stray Ammo", EquipmentKind::Ammo, 0.25, Location::Torso));
        let options = TestEntityOption::default();

        let codes: Vec<FindingCode> = crate::verify(&unit, &options, TechLevel::Standard).findings
            .into_iter()
            .map(|f| f.code)
            .collect();

        assert!(codes.contains(&FindingCode::TonnageExceeded));
        assert!(codes.contains(&FindingCode::EngineInvalid));
        assert!(codes.contains(&FindingCode::InvalidLocation));
    }

    // Test calc_engine_rating {{{2
    macro_rules! test_calc_engine_rating {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, tonnage, walk_mp, quad, glider) = $value;

                    assert_eq!(expected, TestProtomech::calc_engine_rating(tonnage, walk_mp, quad, glider));
                }
            )*
        }
    }
    test_calc_engine_rating! {
        // name:           (rating, tonnage, walk, quad, glider)
        rating_5t_walk4:   (30, 5.0, 4, false, false),
        rating_2t_walk1:   (4, 2.0, 1, false, false),
        rating_9t_walk5:   (75, 9.0, 5, false, false),
        rating_quad:       (28, 7.0, 4, true, false),
        rating_glider:     (36, 6.0, 5, false, true),
        rating_slow_quad:  (1, 3.0, 1, true, false),
        rating_rounds_up:  (45, 7.0, 4, false, false),
    }

    // Test minimum_walk_mp {{{2
    #[test]
    fn minimum_walk() {
        assert_eq!(4, TestProtomech::minimum_walk_mp(&ProtomechData { glider: true, quad: true, ..Default::default() }));
        assert_eq!(3, TestProtomech::minimum_walk_mp(&ProtomechData { quad: true, ..Default::default() }));
        assert_eq!(1, TestProtomech::minimum_walk_mp(&ProtomechData::default()));
    }

    // Test max_armor_factor {{{2
    macro_rules! test_max_armor_factor {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, tonnage, main_gun) = $value;

                    assert_eq!(expected, TestProtomech::max_armor_factor(tonnage, main_gun));
                }
            )*
        }
    }
    test_max_armor_factor! {
        // name:            (max, tonnage, main_gun)
        armor_2t:           (15, 2.0, false),
        armor_5t:           (24, 5.0, false),
        armor_5t_main_gun:  (27, 5.0, true),
        armor_9t:           (42, 9.0, false),
        armor_15t:          (67, 15.0, false),
        armor_clamped_low:  (15, 1.0, false),
    }

    // Test location caps {{{2
    macro_rules! test_location_caps {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (slots, wgt, loc, quad, ultraheavy) = $value;

                    assert_eq!(slots, TestProtomech::max_slots_by_location(loc, quad, ultraheavy));
                    assert_eq!(wgt, TestProtomech::max_weight_by_location(loc, quad, ultraheavy));
                }
            )*
        }
    }
    test_location_caps! {
        // name:               (slots, weight, loc, quad, ultraheavy)
        caps_torso:            (2, Some(2.0), Location::Torso, false, false),
        caps_torso_ultra:      (3, Some(4.0), Location::Torso, false, true),
        caps_torso_quad:       (5, Some(5.0), Location::Torso, true, false),
        caps_torso_quad_ultra: (6, Some(8.0), Location::Torso, true, true),
        caps_arm:              (1, Some(0.5), Location::RightArm, false, false),
        caps_arm_ultra:        (2, Some(1.0), Location::LeftArm, false, true),
        caps_arm_quad:         (0, Some(0.5), Location::LeftArm, true, false),
        caps_main_gun:         (1, None, Location::MainGun, false, false),
        caps_head:             (0, Some(0.0), Location::Head, false, false),
    }

    // Test main gun {{{2
    #[test]
    fn main_gun_rules() {
        let mut unit = legal_proto();
        if let UnitKind::Protomech(data) = &mut unit.kind { data.main_gun = true; }
        let options = TestEntityOption::default();
        let test = TestProtomech::new(&unit, data(&unit), &options);

        let findings = test.check_locations();
        assert_eq!(1, findings.len());
        assert_eq!(Severity::Warning, findings[0].severity);

        let mut unit = legal_proto();
        unit.equipment.push(mounted("Gauss Rifle", EquipmentKind::Weapon, 0.0, Location::MainGun));
        let test = TestProtomech::new(&unit, data(&unit), &options);

        let findings = test.check_locations();
        assert_eq!(1, findings.len());
        assert_eq!(FindingCode::IllegalCombination, findings[0].code);
    }

    #[test]
    fn vehicle_armor_on_proto() {
        let mut unit = legal_proto();
        unit.armor.locations[1].kind = ArmorType::Standard;
        let options = TestEntityOption::default();
        let test = TestProtomech::new(&unit, data(&unit), &options);

        let findings: Vec<Finding> = test.correct_entity(TechLevel::Standard)
            .into_iter()
            .filter(|f| f.code == FindingCode::IllegalCombination)
            .collect();
        assert_eq!(1, findings.len());
        assert!(findings[0].message.contains("Legs"));
    }

    #[test]
    fn overloaded_torso() {
        let mut unit = legal_proto();
        unit.equipment.push(mounted("SRM 4", EquipmentKind::Weapon, 1.5, Location::Torso));
        unit.equipment.push(mounted("Flamer", EquipmentKind::Weapon, 0.5, Location::Torso));
        let options = TestEntityOption::default();
        let test = TestProtomech::new(&unit, data(&unit), &options);

        // 3 items and 3 tons in a 2 slot, 2 ton torso
        assert_eq!(2, test.check_criticals().len());
    }
}
