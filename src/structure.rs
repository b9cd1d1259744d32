use crate::{ChassisMod, MovementMode, TechRating};
use crate::rounding::{self, Ceil};

use serde::{Serialize, Deserialize};

use std::fmt;

// StructureType {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum StructureType {
    #[default]
    Standard,
    EndoSteel,
    EndoPrototype,
    Reinforced,
    Composite,
    Industrial,
    EndoComposite,
}

impl fmt::Display for StructureType { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Standard      => "Standard",
            Self::EndoSteel     => "Endo Steel",
            Self::EndoPrototype => "Endo Steel Prototype",
            Self::Reinforced    => "Reinforced",
            Self::Composite     => "Composite",
            Self::Industrial    => "Industrial",
            Self::EndoComposite => "Endo-Composite",
        })
    }
}

// Structure {{{1
/// Internal structure of a unit.
///
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct Structure {
    pub kind: StructureType,
    pub superheavy: bool,
    pub movement: MovementMode,
}

impl Structure { // {{{2
    pub fn new(kind: StructureType, superheavy: bool, movement: MovementMode) -> Self {
        Self { kind, superheavy, movement }
    }

    // wgt {{{3
    /// Structure weight for a unit of the given tonnage.
    ///
    pub fn wgt(&self, tonnage: f64, ceil: Ceil) -> f64 {
        Self::wgt_structure(self.kind, tonnage, ceil, self.superheavy, self.movement)
    }

    // wgt_structure {{{3
    /// Structure weight from first principles.
    ///
    pub fn wgt_structure(
        kind: StructureType,
        tonnage: f64,
        ceil: Ceil,
        superheavy: bool,
        movement: MovementMode,
    ) -> f64 {
        let mult = if movement == MovementMode::Tripod { 1.1 } else { 1.0 };

        let raw = match kind {
            StructureType::EndoSteel |
            StructureType::EndoPrototype =>
                if superheavy { tonnage / 10.0 } else { tonnage / 20.0 },

            StructureType::Reinforced => tonnage / 5.0,
            StructureType::Composite  => tonnage / 20.0,

            StructureType::Industrial =>
                if superheavy { tonnage / 2.5 } else { tonnage / 5.0 },

            StructureType::EndoComposite =>
                if superheavy { tonnage / 10.0 * 1.5 } else { tonnage / 10.0 * 0.75 },

            StructureType::Standard =>
                if superheavy && ! matches!(movement, MovementMode::Naval | MovementMode::Submarine) {
                    tonnage / 5.0
                } else {
                    tonnage / 10.0
                },
        };

        rounding::ceil_max_half(raw * mult, ceil)
    }
}

// SupportVeeStructure {{{1
/// Support vehicle chassis. The weight formula replaces the standard one
/// entirely.
///
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct SupportVeeStructure {
    /// Base chassis multiplier for the vehicle type and size class.
    pub base_chassis_value: f64,
    /// Structural technology rating.
    pub tech_rating: TechRating,
    /// Chassis modifications.
    pub mods: ChassisMod,
}

impl SupportVeeStructure { // {{{2
    /// Tonnage below which weights are tracked to the kilogram.
    pub const SMALL_TONNAGE: f64 = 5.0;

    // tech_rating_multiplier {{{3
    pub fn tech_rating_multiplier(rating: TechRating) -> f64 {
        match rating {
            TechRating::A => 1.60,
            TechRating::B => 1.30,
            TechRating::C => 1.15,
            TechRating::D => 1.00,
            TechRating::E => 0.85,
            TechRating::F => 0.66,
        }
    }

    // wgt {{{3
    /// Chassis weight. Rounded down, unlike every other structure.
    ///
    pub fn wgt(&self, tonnage: f64) -> f64 {
        let wgt = self.base_chassis_value *
            Self::tech_rating_multiplier(self.tech_rating) *
            self.mods.compound_multiplier() *
            tonnage;

        if tonnage < Self::SMALL_TONNAGE {
            rounding::floor(wgt, Ceil::Kilo)
        } else {
            rounding::floor(wgt, Ceil::HalfTon)
        }
    }
}

#[cfg(test)] // Structure {{{1
mod structure {
    use super::*;
    use proptest::prelude::*;

    // Test wgt_structure {{{2
    macro_rules! test_wgt_structure {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, kind, tonnage, superheavy, movement) = $value;

                    assert_eq!(expected, Structure::wgt_structure(kind, tonnage, Ceil::HalfTon, superheavy, movement));
                }
            )*
        }
    }

    test_wgt_structure! {
        // name:                 (wgt, kind, tonnage, superheavy, movement)
        standard_50:             (5.0, StructureType::Standard, 50.0, false, MovementMode::Tracked),
        standard_55_rounds_up:   (5.5, StructureType::Standard, 55.0, false, MovementMode::Tracked),
        standard_superheavy:     (30.0, StructureType::Standard, 150.0, true, MovementMode::Tracked),
        standard_superheavy_sea: (30.0, StructureType::Standard, 300.0, true, MovementMode::Naval),
        standard_superheavy_sub: (30.0, StructureType::Standard, 300.0, true, MovementMode::Submarine),
        endo_50:                 (2.5, StructureType::EndoSteel, 50.0, false, MovementMode::Biped),
        endo_proto_55:           (3.0, StructureType::EndoPrototype, 55.0, false, MovementMode::Biped),
        endo_superheavy:         (15.0, StructureType::EndoSteel, 150.0, true, MovementMode::Biped),
        reinforced_50:           (10.0, StructureType::Reinforced, 50.0, false, MovementMode::Biped),
        composite_50:            (2.5, StructureType::Composite, 50.0, false, MovementMode::Biped),
        industrial_50:           (10.0, StructureType::Industrial, 50.0, false, MovementMode::Biped),
        industrial_superheavy:   (60.0, StructureType::Industrial, 150.0, true, MovementMode::Biped),
        endo_composite_50:       (4.0, StructureType::EndoComposite, 50.0, false, MovementMode::Biped),
        endo_composite_super:    (22.5, StructureType::EndoComposite, 150.0, true, MovementMode::Biped),
        tripod_standard_60:      (7.0, StructureType::Standard, 60.0, false, MovementMode::Tripod),
        tripod_endo_100:         (5.5, StructureType::EndoSteel, 100.0, false, MovementMode::Tripod),
    }

    // Test ton ceiling never rounds past a half ton {{{2
    #[test]
    fn ton_ceiling_rounds_to_half() {
        assert_eq!(5.5, Structure::wgt_structure(StructureType::Standard, 55.0, Ceil::Ton, false, MovementMode::Tracked));
    }

    // Properties {{{2
    fn any_kind() -> impl Strategy<Value = StructureType> {
        prop_oneof![
            Just(StructureType::Standard),
            Just(StructureType::EndoSteel),
            Just(StructureType::EndoPrototype),
            Just(StructureType::Reinforced),
            Just(StructureType::Composite),
            Just(StructureType::Industrial),
            Just(StructureType::EndoComposite),
        ]
    }

    proptest! {
        #[test]
        fn tripod_adds_a_tenth(kind in any_kind(), tonnage in 10u32..=200) {
            let tonnage = tonnage as f64;
            let tripod = Structure::wgt_structure(kind, tonnage, Ceil::Kilo, false, MovementMode::Tripod);
            let biped = Structure::wgt_structure(kind, tonnage, Ceil::Kilo, false, MovementMode::Biped);

            prop_assert!((tripod - biped * 1.1).abs() <= 0.001 * 1.1 + 1e-9);
        }

        #[test]
        fn superheavy_endo_doubles(tonnage in 10u32..=200) {
            let tonnage = tonnage as f64;
            let heavy = Structure::wgt_structure(StructureType::EndoSteel, tonnage, Ceil::Kilo, true, MovementMode::Biped);
            let light = Structure::wgt_structure(StructureType::EndoSteel, tonnage, Ceil::Kilo, false, MovementMode::Biped);

            prop_assert!((heavy - light * 2.0).abs() <= 0.002 + 1e-9);
        }

        #[test]
        fn structure_is_never_negative(kind in any_kind(), tonnage in 1u32..=600, superheavy in any::<bool>()) {
            prop_assert!(Structure::wgt_structure(kind, tonnage as f64, Ceil::HalfTon, superheavy, MovementMode::Tracked) >= 0.0);
        }
    }
}

#[cfg(test)] // SupportVeeStructure {{{1
mod support_vee_structure {
    use super::*;
    use proptest::prelude::*;

    // Test wgt {{{2
    macro_rules! test_wgt {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, base, rating, mods, tonnage) = $value;

                    let chassis = SupportVeeStructure {
                        base_chassis_value: base,
                        tech_rating: rating,
                        mods: mods,
                    };

                    assert_eq!(expected, chassis.wgt(tonnage));
                }
            )*
        }
    }

    test_wgt! {
        // name:              (wgt, base, rating, mods, tonnage)
        // 0.15 * 1.0 * 20 = 3.0
        medium_wheeled_d:     (3.0, 0.15, TechRating::D, ChassisMod::empty(), 20.0),
        // 0.15 * 1.15 * 30 = 5.175, floored to 5.0
        floors_to_half_ton:   (5.0, 0.15, TechRating::C, ChassisMod::empty(), 30.0),
        // 0.15 * 1.0 * 1.5 * 20 = 4.5
        off_road:             (4.5, 0.15, TechRating::D, ChassisMod::OffRoad, 20.0),
        // 0.12 * 1.6 * 3 = 0.576
        small_uses_kilograms: (0.576, 0.12, TechRating::A, ChassisMod::empty(), 3.0),
        // 0.12 * 0.66 * 4.5 = 0.3564, floored to 0.356
        small_floors_kilos:   (0.356, 0.12, TechRating::F, ChassisMod::empty(), 4.5),
        // 0.15 * 1.0 * 2.0 * 1.75 * 10 = 5.25, floored to 5.0
        compounding:          (5.0, 0.15, TechRating::D, ChassisMod::EnvironmentalSealing | ChassisMod::Amphibious, 10.0),
    }

    // Monotonicity {{{2
    fn any_single_mod() -> impl Strategy<Value = ChassisMod> {
        (0usize..18).prop_map(|i| ChassisMod::from_bits_truncate(1 << i))
    }

    proptest! {
        #[test]
        fn single_mod_moves_with_multiplier(m in any_single_mod(), tonnage in 1u32..=300) {
            let tonnage = tonnage as f64;
            let plain = SupportVeeStructure { base_chassis_value: 0.15, tech_rating: TechRating::D, mods: ChassisMod::empty() };
            let modded = SupportVeeStructure { mods: m, ..plain };

            if m.multiplier() > 1.0 {
                prop_assert!(modded.wgt(tonnage) >= plain.wgt(tonnage));
            } else {
                prop_assert!(modded.wgt(tonnage) <= plain.wgt(tonnage));
            }
        }
    }
}
