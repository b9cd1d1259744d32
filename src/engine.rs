use crate::MovementMode;
use crate::rounding::{self, Ceil};

use serde::{Serialize, Deserialize};

use std::fmt;

// EngineType {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum EngineType {
    #[default]
    Fusion,
    Xl,
    Light,
    Xxl,
    Compact,
    Ice,
    FuelCell,
    Fission,
}

impl fmt::Display for EngineType { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Fusion   => "Fusion",
            Self::Xl       => "XL",
            Self::Light    => "Light",
            Self::Xxl      => "XXL",
            Self::Compact  => "Compact",
            Self::Ice      => "I.C.E.",
            Self::FuelCell => "Fuel Cell",
            Self::Fission  => "Fission",
        })
    }
}

impl EngineType { // {{{2
    // weight_multiplier {{{3
    /// Weight relative to a standard fusion engine of the same rating.
    ///
    pub fn weight_multiplier(&self) -> f64 {
        match self {
            Self::Fusion   => 1.0,
            Self::Xl       => 0.5,
            Self::Light    => 0.75,
            Self::Xxl      => 1.0 / 3.0,
            Self::Compact  => 1.5,
            Self::Ice      => 2.0,
            Self::FuelCell => 1.2,
            Self::Fission  => 1.75,
        }
    }

    // is_fusion {{{3
    pub fn is_fusion(&self) -> bool {
        matches!(self, Self::Fusion | Self::Xl | Self::Light | Self::Xxl | Self::Compact)
    }

    // needs_shielding {{{3
    /// Vehicles carry extra shielding around these engines.
    ///
    pub fn needs_shielding(&self) -> bool {
        self.is_fusion() || *self == Self::Fission
    }
}

// Engine {{{1
/// The unit's engine.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct Engine {
    pub kind: EngineType,
    pub rating: u32,
}

impl Engine { // {{{2
    /// Highest rating in the weight table.
    pub const MAX_RATING: u32 = 500;
    /// Heat sinks carried by fusion engines at no weight.
    pub const FREE_HEAT_SINKS: u32 = 10;
    /// ProtoMech engines at or below this rating use the small engine formula.
    pub const PROTOMECH_SMALL_RATING: u32 = 40;

    /// Standard fusion engine weight for ratings 10 through 500 in steps
    /// of 5.
    const FUSION_WGT: [f64; 99] = [
        0.5, 0.5, 0.5, 0.5,                 // 10 - 25
        1.0, 1.0, 1.0, 1.0,                 // 30 - 45
        1.5, 1.5, 1.5,                      // 50 - 60
        2.0, 2.0, 2.0,                      // 65 - 75
        2.5, 2.5,                           // 80 - 85
        3.0, 3.0, 3.0,                      // 90 - 100
        3.5, 3.5,                           // 105 - 110
        4.0, 4.0, 4.0,                      // 115 - 125
        4.5, 4.5,                           // 130 - 135
        5.0, 5.0,                           // 140 - 145
        5.5, 5.5,                           // 150 - 155
        6.0, 6.0, 6.0,                      // 160 - 170
        7.0, 7.0,                           // 175 - 180
        7.5, 7.5,                           // 185 - 190
        8.0,                                // 195
        8.5, 8.5,                           // 200 - 205
        9.0, 9.5, 10.0, 10.0,               // 210 - 225
        10.5, 11.0, 11.5, 12.0,             // 230 - 245
        12.5, 13.0, 13.5, 14.0,             // 250 - 265
        14.5, 15.5, 16.0, 16.5,             // 270 - 285
        17.5, 18.0, 19.0, 19.5,             // 290 - 305
        20.5, 21.5, 22.5, 23.5,             // 310 - 325
        24.5, 25.5, 27.0, 28.5,             // 330 - 345
        29.5, 31.5, 33.0, 34.5,             // 350 - 365
        36.5, 38.5, 41.0, 43.5,             // 370 - 385
        46.0, 49.0, 52.5, 56.5,             // 390 - 405
        61.0, 66.5, 72.5, 79.5,             // 410 - 425
        87.5, 97.0, 107.5, 119.5,           // 430 - 445
        133.5, 150.0, 168.5, 190.0,         // 450 - 465
        214.5, 243.0, 275.5, 313.0,         // 470 - 485
        356.0, 405.5, 462.5,                // 490 - 500
    ];

    pub fn new(kind: EngineType, rating: u32) -> Self {
        Self { kind, rating }
    }

    // fusion_wgt {{{3
    /// Standard fusion weight for a rating, rounded up to the next step of 5.
    ///
    pub fn fusion_wgt(rating: u32) -> Option<f64> {
        if rating == 0 || rating > Self::MAX_RATING { return None; }

        let step = rating.max(10).div_ceil(5);
        Self::FUSION_WGT.get(step as usize - 2).copied()
    }

    // wgt {{{3
    /// Engine weight. Vehicle engines add shielding.
    ///
    pub fn wgt(&self, vehicle: bool, ceil: Ceil) -> f64 {
        let Some(base) = Self::fusion_wgt(self.rating) else { return 0.0; };

        let mut wgt = base * self.kind.weight_multiplier();
        if vehicle && self.kind.needs_shielding() {
            wgt *= 1.5;
        }

        rounding::ceil_max_half(wgt, ceil)
    }

    // wgt_protomech {{{3
    /// ProtoMech engine weight, always to the kilogram.
    ///
    pub fn wgt_protomech(&self) -> f64 {
        if self.rating <= Self::PROTOMECH_SMALL_RATING {
            rounding::ceil(self.rating as f64 * 0.025, Ceil::Kilo)
        } else {
            self.wgt(false, Ceil::Kilo)
        }
    }

    // free_heat_sinks {{{3
    /// Heat sinks that come with the engine at no weight.
    ///
    pub fn free_heat_sinks(&self) -> u32 {
        if self.kind.is_fusion() { Self::FREE_HEAT_SINKS } else { 0 }
    }

    // problems {{{3
    /// Reasons the engine cannot be built, if any.
    ///
    /// ProtoMechs may use any rating up to the small engine limit.
    ///
    pub fn problems(&self, protomech: bool) -> Vec<String> {
        let mut problems = Vec::new();

        if self.rating == 0 {
            problems.push("Engine rating must be greater than 0".to_string());
        } else if self.rating > Self::MAX_RATING {
            problems.push(format!("Engine rating {} exceeds the maximum of {}", self.rating, Self::MAX_RATING));
        } else if self.rating % 5 != 0 && ! (protomech && self.rating <= Self::PROTOMECH_SMALL_RATING) {
            problems.push(format!("Engine rating {} is not a multiple of 5", self.rating));
        }

        problems
    }

    // tank_rating {{{3
    /// Rating a vehicle needs for its cruising speed.
    ///
    pub fn tank_rating(tonnage: f64, cruise_mp: u32, suspension: u32) -> u32 {
        let raw = (tonnage * cruise_mp as f64).ceil() as i64 - suspension as i64;
        let raw = raw.max(10) as u32;

        raw.div_ceil(5) * 5
    }

    // suspension_factor {{{3
    /// Rating a vehicle gets for free from its motive system.
    ///
    pub fn suspension_factor(movement: MovementMode, tonnage: f64) -> u32 {
        // Weight class brackets: the first that holds the tonnage applies
        fn bracket(tonnage: f64, table: &[(f64, u32)]) -> u32 {
            table.iter()
                .find(|(max, _)| tonnage <= *max)
                .or(table.last())
                .map(|(_, factor)| *factor)
                .unwrap_or(0)
        }

        match movement {
            MovementMode::Wheeled   => 20,
            MovementMode::Naval |
            MovementMode::Submarine => 30,

            MovementMode::Hover => bracket(tonnage, &[
                (10.0, 40), (20.0, 85), (30.0, 130), (40.0, 175), (50.0, 235),
            ]),

            MovementMode::Vtol => bracket(tonnage, &[
                (10.0, 50), (20.0, 95), (30.0, 140),
            ]),

            MovementMode::Hydrofoil => bracket(tonnage, &[
                (10.0, 60), (20.0, 105), (30.0, 150), (40.0, 195), (50.0, 255),
                (60.0, 300), (70.0, 345), (80.0, 390), (90.0, 435), (100.0, 480),
            ]),

            MovementMode::Wige => bracket(tonnage, &[
                (15.0, 45), (30.0, 80), (45.0, 115), (80.0, 140),
            ]),

            _ => 0,
        }
    }
}

impl fmt::Display for Engine { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.rating, self.kind)
    }
}

// Testing Engine {{{1
#[cfg(test)]
mod engine {
    use super::*;

    // Test fusion_wgt {{{2
    macro_rules! test_fusion_wgt {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, rating) = $value;

                    assert_eq!(expected, Engine::fusion_wgt(rating));
                }
            )*
        }
    }
    test_fusion_wgt! {
        // name:          (wgt, rating)
        fusion_zero:      (None, 0),
        fusion_5:         (Some(0.5), 5),
        fusion_10:        (Some(0.5), 10),
        fusion_100:       (Some(3.0), 100),
        fusion_200:       (Some(8.5), 200),
        fusion_between:   (Some(8.5), 203),
        fusion_300:       (Some(19.0), 300),
        fusion_400:       (Some(52.5), 400),
        fusion_500:       (Some(462.5), 500),
        fusion_too_big:   (None, 505),
    }

    // Test wgt {{{2
    macro_rules! test_wgt {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, kind, rating, vehicle) = $value;

                    assert_eq!(expected, Engine::new(kind, rating).wgt(vehicle, Ceil::HalfTon));
                }
            )*
        }
    }
    test_wgt! {
        // name:              (wgt, kind, rating, vehicle)
        wgt_fusion:           (3.0, EngineType::Fusion, 100, false),
        // 8.5 * 1.5
        wgt_fusion_tank:      (13.0, EngineType::Fusion, 200, true),
        // 8.5 * 0.5 * 1.5
        wgt_xl_tank:          (6.5, EngineType::Xl, 200, true),
        // 19 * 0.75 * 1.5
        wgt_light_tank:       (21.5, EngineType::Light, 300, true),
        wgt_ice_tank:         (6.0, EngineType::Ice, 100, true),
        // 19 / 3
        wgt_xxl:              (6.5, EngineType::Xxl, 300, false),
        // 3 * 1.5 * 1.5
        wgt_compact_tank:     (7.0, EngineType::Compact, 100, true),
        // 3 * 1.75 * 1.5
        wgt_fission_tank:     (8.0, EngineType::Fission, 100, true),
        wgt_fuel_cell_tank:   (4.0, EngineType::FuelCell, 100, true),
    }

    // Test wgt_protomech {{{2
    macro_rules! test_wgt_protomech {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, rating) = $value;

                    assert_eq!(expected, Engine::new(EngineType::Fusion, rating).wgt_protomech());
                }
            )*
        }
    }
    test_wgt_protomech! {
        // name:        (wgt, rating)
        proto_small:    (0.75, 30),
        proto_odd:      (0.575, 23),
        proto_limit:    (1.0, 40),
        proto_table:    (1.0, 45),
        proto_large:    (2.0, 70),
    }

    // Test tank_rating {{{2
    macro_rules! test_tank_rating {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, tonnage, cruise, movement) = $value;

                    let suspension = Engine::suspension_factor(movement, tonnage);

                    assert_eq!(expected, Engine::tank_rating(tonnage, cruise, suspension));
                }
            )*
        }
    }
    test_tank_rating! {
        // name:            (rating, tonnage, cruise, movement)
        rating_tracked:     (200, 50.0, 4, MovementMode::Tracked),
        rating_wheeled:     (180, 40.0, 5, MovementMode::Wheeled),
        rating_hover:       (75, 20.0, 8, MovementMode::Hover),
        rating_minimum:     (10, 10.0, 1, MovementMode::Hover),
        rating_rounds_up:   (90, 27.0, 4, MovementMode::Wheeled),
        rating_vtol:        (100, 30.0, 8, MovementMode::Vtol),
    }

    // Test suspension_factor {{{2
    macro_rules! test_suspension_factor {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, movement, tonnage) = $value;

                    assert_eq!(expected, Engine::suspension_factor(movement, tonnage));
                }
            )*
        }
    }
    test_suspension_factor! {
        // name:              (factor, movement, tonnage)
        suspension_tracked:   (0, MovementMode::Tracked, 60.0),
        suspension_wheeled:   (20, MovementMode::Wheeled, 60.0),
        suspension_naval:     (30, MovementMode::Naval, 200.0),
        suspension_hover_lt:  (40, MovementMode::Hover, 10.0),
        suspension_hover_md:  (130, MovementMode::Hover, 25.0),
        suspension_hover_max: (235, MovementMode::Hover, 50.0),
        suspension_vtol:      (95, MovementMode::Vtol, 15.0),
        suspension_foil_lt:   (60, MovementMode::Hydrofoil, 10.0),
        suspension_foil_hv:   (480, MovementMode::Hydrofoil, 100.0),
        suspension_wige:      (115, MovementMode::Wige, 40.0),
    }

    // Test problems {{{2
    #[test]
    fn problems_with_rating() {
        assert!(Engine::new(EngineType::Fusion, 200).problems(false).is_empty());
        assert_eq!(1, Engine::new(EngineType::Fusion, 0).problems(false).len());
        assert_eq!(1, Engine::new(EngineType::Fusion, 505).problems(false).len());
        assert_eq!(1, Engine::new(EngineType::Fusion, 23).problems(false).len());
        assert!(Engine::new(EngineType::Fusion, 23).problems(true).is_empty());
    }

    #[test]
    fn free_heat_sinks_only_for_fusion() {
        assert_eq!(10, Engine::new(EngineType::Xl, 200).free_heat_sinks());
        assert_eq!(0, Engine::new(EngineType::Ice, 200).free_heat_sinks());
    }
}
