use crate::Location;
use crate::rounding::{self, Ceil};

use serde::{Serialize, Deserialize};

use std::fmt;

// Armor {{{1
/// The unit's armor, one entry per armored location.
///
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Armor {
    pub locations: Vec<LocationArmor>,
}

impl Armor { // {{{2
    /// Armor points per ton of standard armor.
    pub const POINTS_PER_TON: f64 = 16.0;

    // total_points {{{3
    /// Total armor points across every location.
    ///
    pub fn total_points(&self) -> u32 {
        self.locations.iter().map(|l| l.points).sum()
    }

    // unified_kind {{{3
    /// The single armor type used throughout, or None for patchwork armor.
    ///
    pub fn unified_kind(&self) -> Option<(ArmorType, bool)> {
        let mut kinds = self.locations.iter().map(|l| (l.kind, l.clan));
        let first = kinds.next().unwrap_or((ArmorType::Standard, false));

        if kinds.all(|k| k == first) { Some(first) } else { None }
    }

    // is_patchwork {{{3
    pub fn is_patchwork(&self) -> bool {
        self.unified_kind().is_none()
    }

    // has_kind {{{3
    pub fn has_kind(&self, kind: ArmorType) -> bool {
        self.locations.iter().any(|l| l.kind == kind)
    }

    // wgt {{{3
    /// Total weight of armor.
    ///
    /// Unified armor is rounded once. Patchwork armor is rounded per
    /// location.
    ///
    pub fn wgt(&self, ceil: Ceil) -> f64 {
        match self.unified_kind() {
            Some((kind, clan)) =>
                rounding::ceil_max_half(self.total_points() as f64 / kind.points_per_ton(clan), ceil),

            None => self.locations.iter()
                .map(|l| l.wgt(ceil))
                .sum(),
        }
    }

    // slots {{{3
    /// Vehicle item slots taken by the armor.
    ///
    pub fn slots(&self) -> u32 {
        self.locations.iter()
            .map(|l| l.kind.tank_slots(l.clan))
            .max()
            .unwrap_or(0)
    }
}

// Testing Armor {{{2
#[cfg(test)]
mod armor {
    use super::*;

    fn armor(kind: ArmorType, clan: bool, points: &[(Location, u32)]) -> Armor {
        Armor {
            locations: points.iter()
                .map(|(location, points)| LocationArmor { location: *location, kind, clan, points: *points })
                .collect(),
        }
    }

    // Test wgt {{{3
    macro_rules! test_wgt {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, kind, clan, points, ceil) = $value;

                    let armor = armor(kind, clan, &[
                        (Location::Front, points / 2),
                        (Location::Rear, points - points / 2),
                    ]);

                    assert_eq!(expected, armor.wgt(ceil));
                }
            )*
        }
    }
    test_wgt! {
        // name:             (wgt, kind, clan, points, ceil)
        standard_exact:      (5.0, ArmorType::Standard, false, 80, Ceil::HalfTon),
        standard_rounds_up:  (5.5, ArmorType::Standard, false, 81, Ceil::HalfTon),
        // 112 / 17.92 = 6.25
        ferro_is:            (6.5, ArmorType::FerroFibrous, false, 112, Ceil::HalfTon),
        // 96 / 19.2 = 5.0
        ferro_clan:          (5.0, ArmorType::FerroFibrous, true, 96, Ceil::HalfTon),
        hardened:            (10.0, ArmorType::Hardened, false, 80, Ceil::HalfTon),
        // 80 * 0.05
        proto_standard:      (4.0, ArmorType::ProtomechStandard, false, 80, Ceil::Kilo),
        // 15 * 0.05
        proto_kilos:         (0.75, ArmorType::ProtomechStandard, false, 15, Ceil::Kilo),
    }

    // Test patchwork {{{3
    #[test]
    fn patchwork_rounds_each_location() {
        let armor = Armor {
            locations: vec![
                LocationArmor { location: Location::Front, kind: ArmorType::Standard, clan: false, points: 20 },
                LocationArmor { location: Location::Rear, kind: ArmorType::Hardened, clan: false, points: 9 },
            ],
        };

        assert!(armor.is_patchwork());
        // 20 / 16 = 1.25 -> 1.5; 9 / 8 = 1.125 -> 1.5
        assert_eq!(3.0, armor.wgt(Ceil::HalfTon));
    }

    // Test slots {{{3
    #[test]
    fn slots_by_tech_base() {
        let is = armor(ArmorType::FerroFibrous, false, &[(Location::Front, 10)]);
        let clan = armor(ArmorType::FerroFibrous, true, &[(Location::Front, 10)]);

        assert_eq!(2, is.slots());
        assert_eq!(1, clan.slots());
        assert_eq!(0, Armor::default().slots());
    }
}

// LocationArmor {{{1
/// Armor in a single location.
///
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct LocationArmor {
    pub location: Location,
    pub kind: ArmorType,
    /// Clan version of the armor type.
    #[serde(default)]
    pub clan: bool,
    pub points: u32,
}

impl LocationArmor { // {{{2
    // wgt {{{3
    pub fn wgt(&self, ceil: Ceil) -> f64 {
        rounding::ceil_max_half(self.points as f64 / self.kind.points_per_ton(self.clan), ceil)
    }
}

// ArmorType {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum ArmorType {
    #[default]
    Standard,
    FerroFibrous,
    LightFerro,
    HeavyFerro,
    Stealth,
    Reactive,
    Reflective,
    Hardened,
    FerroLamellor,
    Industrial,
    HeavyIndustrial,
    Commercial,
    ProtomechStandard,
    /// Electric discharge ProtoMech armor.
    Edp,
}

impl fmt::Display for ArmorType { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Standard          => "Standard",
            Self::FerroFibrous      => "Ferro-Fibrous",
            Self::LightFerro        => "Light Ferro-Fibrous",
            Self::HeavyFerro        => "Heavy Ferro-Fibrous",
            Self::Stealth           => "Stealth",
            Self::Reactive          => "Reactive",
            Self::Reflective        => "Reflective",
            Self::Hardened          => "Hardened",
            Self::FerroLamellor     => "Ferro-Lamellor",
            Self::Industrial        => "Industrial",
            Self::HeavyIndustrial   => "Heavy Industrial",
            Self::Commercial        => "Commercial",
            Self::ProtomechStandard => "Standard ProtoMech",
            Self::Edp               => "Electric Discharge ProtoMech",
        })
    }
}

impl ArmorType { // {{{2
    // points_per_ton {{{3
    /// Armor points provided by one ton.
    ///
    pub fn points_per_ton(&self, clan: bool) -> f64 {
        match self {
            Self::FerroFibrous      => Armor::POINTS_PER_TON * if clan { 1.2 } else { 1.12 },
            Self::LightFerro        => Armor::POINTS_PER_TON * 1.06,
            Self::HeavyFerro        => Armor::POINTS_PER_TON * 1.24,
            Self::Hardened          => Armor::POINTS_PER_TON * 0.5,
            Self::FerroLamellor     => Armor::POINTS_PER_TON * 0.875,
            Self::Industrial        => Armor::POINTS_PER_TON * 0.67,
            Self::Commercial        => Armor::POINTS_PER_TON * 0.75,
            // 50 kg per point
            Self::ProtomechStandard => 20.0,
            // 75 kg per point
            Self::Edp               => 1.0 / 0.075,

            Self::Standard |
            Self::Stealth |
            Self::Reactive |
            Self::Reflective |
            Self::HeavyIndustrial   => Armor::POINTS_PER_TON,
        }
    }

    // tank_slots {{{3
    /// Vehicle item slots taken up by this armor type.
    ///
    pub fn tank_slots(&self, clan: bool) -> u32 {
        match self {
            Self::FerroFibrous  => if clan { 1 } else { 2 },
            Self::LightFerro    => 1,
            Self::HeavyFerro    => 3,
            Self::Stealth       => 2,
            Self::Reactive      => if clan { 2 } else { 3 },
            Self::Reflective    => if clan { 1 } else { 2 },
            Self::FerroLamellor => 2,
            _                   => 0,
        }
    }

    // is_protomech {{{3
    pub fn is_protomech(&self) -> bool {
        matches!(self, Self::ProtomechStandard | Self::Edp)
    }
}
