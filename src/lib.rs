pub mod armor;
pub mod bays;
pub mod engine;
pub mod error;
pub mod findings;
pub mod jump_jets;
pub mod options;
pub mod placement;
pub mod rounding;
pub mod structure;
pub mod test_entity;
pub mod unit;
pub mod weights;

pub use error::{Result, VerifyError};
pub use findings::{Finding, FindingCode, Outcome, Severity, Verdict};
pub use options::{TestEntityOption, TestEntityOptionBuilder};
pub use rounding::Ceil;
pub use test_entity::UnitWeightModel;
pub use unit::{Mounted, Unit, UnitKind};
pub use weights::WeightBreakdown;

use bitflags::{bitflags, bitflags_match};
use serde::{Serialize, Deserialize};

use std::fmt;


// verify {{{1
/// Check a unit against the construction rules for its category.
///
/// `ammo_tech_level` is the rules level ammunition is held to, which may be
/// looser than the unit's own level.
///
pub fn verify(unit: &Unit, options: &TestEntityOption, ammo_tech_level: TechLevel) -> Verdict {
    test_entity::for_unit(unit, options).verify(ammo_tech_level)
}

// UnitCategory {{{1
/// Broad construction category; selects the rules variant.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum UnitCategory {
    Mek,
    Tank,
    Aero,
    SmallCraft,
    AdvancedAerospace,
    Protomech,
    Infantry,
    BattleArmor,
    Building,
}

impl UnitCategory { // {{{2
    // is_aerospace {{{3
    /// Return true for fighters, small craft and large craft.
    ///
    pub fn is_aerospace(&self) -> bool {
        matches!(self, Self::Aero | Self::SmallCraft | Self::AdvancedAerospace)
    }
}

impl fmt::Display for UnitCategory { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Mek               => "Mek",
            Self::Tank              => "Tank",
            Self::Aero              => "Aerospace Fighter",
            Self::SmallCraft        => "Small Craft",
            Self::AdvancedAerospace => "Large Craft",
            Self::Protomech         => "ProtoMech",
            Self::Infantry          => "Infantry",
            Self::BattleArmor       => "Battle Armor",
            Self::Building          => "Building",
        })
    }
}

// MovementMode {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum MovementMode {
    #[default]
    None,
    Biped,
    Tripod,
    Quad,
    Tracked,
    Wheeled,
    Hover,
    Vtol,
    Naval,
    Hydrofoil,
    Submarine,
    Wige,
    Rail,
    Maglev,
    /// Foot infantry.
    InfLeg,
    InfMotorized,
    InfJump,
    /// Underwater maneuvering units (SCUBA).
    InfUmu,
}

impl fmt::Display for MovementMode { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::None         => "None",
            Self::Biped        => "Biped",
            Self::Tripod       => "Tripod",
            Self::Quad         => "Quad",
            Self::Tracked      => "Tracked",
            Self::Wheeled      => "Wheeled",
            Self::Hover        => "Hover",
            Self::Vtol         => "VTOL",
            Self::Naval        => "Naval",
            Self::Hydrofoil    => "Hydrofoil",
            Self::Submarine    => "Submarine",
            Self::Wige         => "WiGE",
            Self::Rail         => "Rail",
            Self::Maglev       => "MagLev",
            Self::InfLeg       => "Leg",
            Self::InfMotorized => "Motorized",
            Self::InfJump      => "Jump",
            Self::InfUmu       => "UMU",
        })
    }
}

impl MovementMode { // {{{2
    // is_marine {{{3
    /// Return true for surface and submerged naval movement.
    ///
    pub fn is_marine(&self) -> bool {
        matches!(self, Self::Naval | Self::Hydrofoil | Self::Submarine)
    }

    // is_ground {{{3
    /// Return true for vehicles that rest on the ground.
    ///
    pub fn is_ground(&self) -> bool {
        matches!(self, Self::Tracked | Self::Wheeled)
    }
}

// TechBase {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum TechBase {
    /// Available to everybody; only meaningful for equipment.
    All,
    #[default]
    InnerSphere,
    Clan,
    /// Mixed tech; only meaningful for units.
    Mixed,
}

impl TechBase { // {{{2
    // allows {{{3
    /// Return true if a unit of this tech base may mount equipment of
    /// `equipment`'s base.
    ///
    pub fn allows(&self, equipment: TechBase) -> bool {
        match (self, equipment) {
            (Self::Mixed, _) | (_, Self::All) => true,
            (unit, equip)                     => *unit == equip,
        }
    }
}

impl fmt::Display for TechBase { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::All         => "All",
            Self::InnerSphere => "Inner Sphere",
            Self::Clan        => "Clan",
            Self::Mixed       => "Mixed",
        })
    }
}

// TechLevel {{{1
/// Rules level, ordered from most to least restrictive.
///
#[derive(PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum TechLevel {
    Introductory,
    #[default]
    Standard,
    Advanced,
    Experimental,
    Unofficial,
}

impl From<String> for TechLevel { // {{{2
    fn from(index: String) -> Self {
        index.as_str().into()
    }
}

impl From<&str> for TechLevel {
    fn from(index: &str) -> Self {
        match index.to_lowercase().as_str() {
            "introductory" | "intro" | "0" => Self::Introductory,
            "advanced" | "2"               => Self::Advanced,
            "experimental" | "3"           => Self::Experimental,
            "unofficial" | "4"             => Self::Unofficial,
            "standard" | "1" | _           => Self::Standard,
        }
    }
}

impl fmt::Display for TechLevel { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Introductory => "Introductory",
            Self::Standard     => "Standard",
            Self::Advanced     => "Advanced",
            Self::Experimental => "Experimental",
            Self::Unofficial   => "Unofficial",
        })
    }
}

// TechAdvancement {{{1
/// Where and when a piece of technology becomes available.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug)]
pub struct TechAdvancement {
    pub base: TechBase,
    pub level: TechLevel,
    pub intro_year: u32,
}

impl TechAdvancement { // {{{2
    pub const fn new(base: TechBase, level: TechLevel, intro_year: u32) -> Self {
        Self { base, level, intro_year }
    }
}

impl Default for TechAdvancement {
    fn default() -> Self {
        Self::new(TechBase::All, TechLevel::Introductory, 0)
    }
}

// TechRating {{{1
/// Technology rating of a support vehicle chassis.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum TechRating {
    A,
    B,
    C,
    #[default]
    D,
    E,
    F,
}

impl fmt::Display for TechRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// Location {{{1
/// Mounting location. Vehicles and ProtoMechs share `Body` for items that
/// have no facing, such as ammunition.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Hash)]
pub enum Location {
    Body,
    Front,
    FrontRight,
    FrontLeft,
    Right,
    Left,
    RearRight,
    RearLeft,
    Rear,
    Turret,
    Turret2,
    Rotor,

    Head,
    Torso,
    RightArm,
    LeftArm,
    Legs,
    MainGun,
}

impl Location { // {{{2
    // is_superheavy_only {{{3
    /// Split side locations only exist on superheavy vehicles.
    ///
    pub fn is_superheavy_only(&self) -> bool {
        matches!(self,
            Self::FrontRight | Self::FrontLeft |
            Self::RearRight | Self::RearLeft
        )
    }

    // is_protomech {{{3
    pub fn is_protomech(&self) -> bool {
        matches!(self,
            Self::Head | Self::Torso |
            Self::RightArm | Self::LeftArm |
            Self::Legs | Self::MainGun
        )
    }
}

impl fmt::Display for Location { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Body       => "Body",
            Self::Front      => "Front",
            Self::FrontRight => "Front Right",
            Self::FrontLeft  => "Front Left",
            Self::Right      => "Right",
            Self::Left       => "Left",
            Self::RearRight  => "Rear Right",
            Self::RearLeft   => "Rear Left",
            Self::Rear       => "Rear",
            Self::Turret     => "Turret",
            Self::Turret2    => "Front Turret",
            Self::Rotor      => "Rotor",
            Self::Head       => "Head",
            Self::Torso      => "Torso",
            Self::RightArm   => "Right Arm",
            Self::LeftArm    => "Left Arm",
            Self::Legs       => "Legs",
            Self::MainGun    => "Main Gun",
        })
    }
}

// EquipmentFlags {{{1
bitflags! {
    /// Capabilities of a piece of equipment that the construction rules care
    /// about.
    ///
    #[derive(PartialEq, Eq, Serialize, Deserialize, Default, Debug, Clone, Copy)]
    pub struct EquipmentFlags: u64 {
        const Energy               = 1 << 0;
        const Ppc                  = 1 << 1;
        const ChemicalLaser        = 1 << 2;
        const Flamer               = 1 << 3;
        const PpcCapacitor         = 1 << 4;
        const SpotWelder           = 1 << 5;
        const DirectFire           = 1 << 6;
        const TargetingComputer    = 1 << 7;
        const Torpedo              = 1 << 8;
        const Artillery            = 1 << 9;
        const Tag                  = 1 << 10;
        const Electronics          = 1 << 11;

        const JumpJet              = 1 << 16;
        const Umu                  = 1 << 17;
        const MastMount            = 1 << 18;
        const VtolJetBooster       = 1 << 19;
        const Bulldozer            = 1 << 20;
        const Minesweeper          = 1 << 21;
        const FlotationHull        = 1 << 22;
        const LimitedAmphibious    = 1 << 23;
        const FullyAmphibious      = 1 << 24;
        const DuneBuggy            = 1 << 25;
        const EnvironmentalSealing = 1 << 26;
        const ArmoredMotive        = 1 << 27;
        const TrailerHitch         = 1 << 28;
        const BridgeLayer          = 1 << 29;
        const IndustrialTool       = 1 << 30;
        const FluidSuction         = 1 << 31;
        const SponsonTurret        = 1 << 32;
        const PintleTurret         = 1 << 33;
        const Supercharger         = 1 << 34;

        /// ProtoMech system equipment that does not use location space.
        const ProtoSystem          = 1 << 40;
        const MyomerBooster        = 1 << 41;
        const MagneticClamp        = 1 << 42;
    }
}

impl EquipmentFlags { // {{{2
    // is_body_only {{{3
    /// Vehicle equipment that must be mounted in the body.
    ///
    pub fn is_body_only(&self) -> bool {
        self.intersects(
            Self::JumpJet |
            Self::EnvironmentalSealing |
            Self::FlotationHull |
            Self::LimitedAmphibious |
            Self::FullyAmphibious |
            Self::DuneBuggy |
            Self::ArmoredMotive |
            Self::Supercharger |
            Self::TargetingComputer |
            Self::VtolJetBooster
        )
    }

    // is_amphibious {{{3
    pub fn is_amphibious(&self) -> bool {
        self.intersects(Self::LimitedAmphibious | Self::FullyAmphibious)
    }
}

// ChassisMod {{{1
bitflags! {
    /// Support vehicle chassis modifications.
    ///
    #[derive(PartialEq, Eq, Serialize, Deserialize, Default, Debug, Clone, Copy)]
    pub struct ChassisMod: u32 {
        const Amphibious           = 1 << 0;
        const Armored              = 1 << 1;
        const Bicycle              = 1 << 2;
        const Convertible          = 1 << 3;
        const DuneBuggy            = 1 << 4;
        const EnvironmentalSealing = 1 << 5;
        const ExternalPowerPickup  = 1 << 6;
        const Hydrofoil            = 1 << 7;
        const Monocycle            = 1 << 8;
        const OffRoad              = 1 << 9;
        const Prop                 = 1 << 10;
        const Snowmobile           = 1 << 11;
        const Stol                 = 1 << 12;
        const Submersible          = 1 << 13;
        const Tractor              = 1 << 14;
        const Trailer              = 1 << 15;
        const UltraLight           = 1 << 16;
        const Vstol                = 1 << 17;
    }
}

impl ChassisMod { // {{{2
    // multiplier {{{3
    /// Structure weight multiplier for a single modification.
    ///
    /// Returns 1.0 for an empty or combined set.
    ///
    pub fn multiplier(&self) -> f64 {
        bitflags_match!(*self, {
            Self::Amphibious           => 1.75,
            Self::Armored              => 1.5,
            Self::Bicycle              => 0.75,
            Self::Convertible          => 1.1,
            Self::DuneBuggy            => 1.5,
            Self::EnvironmentalSealing => 2.0,
            Self::ExternalPowerPickup  => 1.1,
            Self::Hydrofoil            => 1.7,
            Self::Monocycle            => 0.5,
            Self::OffRoad              => 1.5,
            Self::Prop                 => 1.2,
            Self::Snowmobile           => 1.75,
            Self::Stol                 => 1.5,
            Self::Submersible          => 1.8,
            Self::Tractor              => 1.2,
            Self::Trailer              => 0.8,
            Self::UltraLight           => 0.5,
            Self::Vstol                => 2.0,
            _                          => 1.0,
        })
    }

    // compound_multiplier {{{3
    /// Product of the multipliers of every modification present.
    ///
    pub fn compound_multiplier(&self) -> f64 {
        self.iter().map(|m| m.multiplier()).product()
    }
}

#[cfg(test)] // ChassisMod {{{1
mod chassis_mod {
    use super::*;
    use crate::test_support::*;

    // Test compound_multiplier {{{2
    macro_rules! test_compound_multiplier {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, mods) = $value;

                    assert_eq!(expected, to_place(ChassisMod::compound_multiplier(&mods), 4));
                }
            )*
        }
    }

    test_compound_multiplier! {
        // name:            (multiplier, mods)
        compound_none:      (1.0, ChassisMod::empty()),
        compound_single:    (1.75, ChassisMod::Amphibious),
        compound_pair:      (3.0, ChassisMod::Armored | ChassisMod::EnvironmentalSealing),
        compound_reducing:  (0.375, ChassisMod::Bicycle | ChassisMod::UltraLight),
        compound_vstol:     (2.0, ChassisMod::Vstol),
    }
}


#[cfg(test)] // TechLevel {{{1
mod tech_level {
    use super::*;

    // Test from {{{2
    macro_rules! test_from {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, s) = $value;

                    assert_eq!(expected, TechLevel::from(s));
                }
            )*
        }
    }

    test_from! {
        // name:           (level, string)
        from_intro:        (TechLevel::Introductory, "intro"),
        from_index:        (TechLevel::Advanced, "2"),
        from_mixed_case:   (TechLevel::Experimental, "Experimental"),
        from_unknown:      (TechLevel::Standard, "tournament"),
    }

    #[test]
    fn ordered_by_restriction() {
        assert!(TechLevel::Introductory < TechLevel::Standard);
        assert!(TechLevel::Advanced < TechLevel::Unofficial);
    }
}
