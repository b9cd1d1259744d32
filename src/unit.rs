use crate::{EquipmentFlags, Location, MovementMode, TechAdvancement, TechBase, TechLevel, UnitCategory};
use crate::armor::Armor;
use crate::bays::Bay;
use crate::engine::Engine;
use crate::error::Result;
use crate::structure::{StructureType, SupportVeeStructure};

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::fs;

// Unit {{{1
/// A fully described unit to be checked.
///
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Unit {
    pub name: String,
    /// Year of introduction.
    pub year: u32,
    /// Declared tonnage.
    pub tonnage: f64,
    #[serde(default)]
    pub tech_base: TechBase,
    #[serde(default)]
    pub tech_level: TechLevel,
    #[serde(default)]
    pub movement: MovementMode,
    #[serde(default)]
    pub engine: Option<Engine>,
    #[serde(default)]
    pub structure: StructureType,
    #[serde(default)]
    pub armor: Armor,
    #[serde(default)]
    pub equipment: Vec<Mounted>,
    /// Equipment names that could not be resolved when the unit was read.
    #[serde(default)]
    pub failed_equipment: Vec<String>,

    pub kind: UnitKind,
}

impl Unit { // {{{2
    // load {{{3
    /// Load unit from a file.
    ///
    pub fn load(p: &str) -> Result<Unit> {
        let s = fs::read_to_string(p)?;
        let unit = serde_json::from_str(&s)?;

        Ok(unit)
    }

    // save {{{3
    /// Save unit to a file.
    ///
    pub fn save(&self, p: &str) -> Result<()> {
        let s = serde_json::to_string_pretty(&self)?;
        fs::write(p, s)?;

        Ok(())
    }

    // category {{{3
    pub fn category(&self) -> UnitCategory {
        match self.kind {
            UnitKind::Tank(_)      => UnitCategory::Tank,
            UnitKind::Infantry(_)  => UnitCategory::Infantry,
            UnitKind::Protomech(_) => UnitCategory::Protomech,
            UnitKind::Building(_)  => UnitCategory::Building,
        }
    }

    // equipment_at {{{3
    /// Equipment mounted in a location.
    ///
    pub fn equipment_at(&self, loc: Location) -> impl Iterator<Item = &Mounted> {
        self.equipment.iter().filter(move |m| m.location == Some(loc))
    }

    // count_flag {{{3
    /// Number of mounted items with a capability.
    ///
    pub fn count_flag(&self, flag: EquipmentFlags) -> usize {
        self.equipment.iter().filter(|m| m.has(flag)).count()
    }

    // has_flag {{{3
    pub fn has_flag(&self, flag: EquipmentFlags) -> bool {
        self.equipment.iter().any(|m| m.has(flag))
    }
}

// UnitKind {{{1
/// Data that only applies to one category of unit.
///
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "category")]
pub enum UnitKind {
    Tank(TankData),
    Infantry(InfantryData),
    Protomech(ProtomechData),
    Building(BuildingData),
}

// EquipmentKind {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum EquipmentKind {
    Weapon,
    Ammo,
    #[default]
    Misc,
}

// Mounted {{{1
/// A piece of equipment as mounted on a unit.
///
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Mounted {
    pub name: String,
    #[serde(default)]
    pub kind: EquipmentKind,
    #[serde(default)]
    pub flags: EquipmentFlags,
    pub tonnage: f64,
    /// Item slots or critical slots taken.
    #[serde(default)]
    pub slots: u32,
    #[serde(default)]
    pub heat: u32,
    /// None when the item has not been placed.
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub tech: TechAdvancement,
    /// Index of the item linked to this one, such as a PPC capacitor.
    #[serde(default)]
    pub linked_by: Option<usize>,
    #[serde(default)]
    pub rear_mounted: bool,
    #[serde(default)]
    pub omni_pod: bool,
}

impl Mounted { // {{{2
    // has {{{3
    pub fn has(&self, flag: EquipmentFlags) -> bool {
        self.flags.contains(flag)
    }

    // is_ammo {{{3
    pub fn is_ammo(&self) -> bool {
        self.kind == EquipmentKind::Ammo
    }

    // is_weapon {{{3
    pub fn is_weapon(&self) -> bool {
        self.kind == EquipmentKind::Weapon
    }

    // is_amplified {{{3
    /// Energy weapons that need a power amplifier without a fusion engine.
    ///
    pub fn is_amplified(&self) -> bool {
        self.is_weapon() &&
            self.has(EquipmentFlags::Energy) &&
            ! self.flags.intersects(EquipmentFlags::ChemicalLaser | EquipmentFlags::Flamer)
    }
}

// TurretConfig {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum TurretConfig {
    #[default]
    None,
    Single,
    Dual,
}

impl TurretConfig { // {{{2
    // count {{{3
    pub fn count(&self) -> u32 {
        match self {
            Self::None   => 0,
            Self::Single => 1,
            Self::Dual   => 2,
        }
    }
}

impl fmt::Display for TurretConfig { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::None   => "None",
            Self::Single => "Single",
            Self::Dual   => "Dual",
        })
    }
}

// TankData {{{1
/// Combat and support vehicle details.
///
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct TankData {
    pub superheavy: bool,
    pub omni: bool,
    pub turret: TurretConfig,
    /// Turret weight fixed by an omni base chassis.
    pub base_chassis_turret_weight: Option<f64>,
    /// Front turret weight fixed by an omni base chassis.
    pub base_chassis_turret2_weight: Option<f64>,
    pub no_control_systems: bool,
    pub cruise_mp: u32,
    /// Present for support vehicles.
    pub support: Option<SupportVeeStructure>,
    pub bays: Vec<Bay>,
    /// Tons of infantry compartment.
    pub infantry_compartment: f64,
    pub extra_crew_seats: u32,
}

impl TankData { // {{{2
    // is_support {{{3
    pub fn is_support(&self) -> bool {
        self.support.is_some()
    }
}

// InfantryMount {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum MountSize {
    Large,
    VeryLarge,
    Monstrous,
}

/// Beast mount ridden by infantry.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Debug)]
pub struct InfantryMount {
    pub name: String,
    pub size: MountSize,
}

impl InfantryMount { // {{{2
    // troops_per_creature {{{3
    pub fn troops_per_creature(&self) -> u32 {
        match self.size {
            MountSize::Large     => 1,
            MountSize::VeryLarge => 2,
            MountSize::Monstrous => 4,
        }
    }

    // creatures_per_platoon {{{3
    pub fn creatures_per_platoon(&self) -> u32 {
        match self.size {
            MountSize::Large     => 20,
            MountSize::VeryLarge => 10,
            MountSize::Monstrous => 5,
        }
    }

    // support_weapons_per_creature {{{3
    pub fn support_weapons_per_creature(&self) -> u32 {
        match self.size {
            MountSize::Large     => 0,
            MountSize::VeryLarge => 1,
            MountSize::Monstrous => 2,
        }
    }
}

// InfantrySpecialization {{{1
bitflags! {
    #[derive(PartialEq, Eq, Serialize, Deserialize, Default, Debug, Clone, Copy)]
    pub struct InfantrySpecialization: u32 {
        const CombatEngineers = 1 << 0;
        const MountainTroops  = 1 << 1;
        const TagTroops       = 1 << 2;
        const Paratroops      = 1 << 3;
        const MarineTroops    = 1 << 4;
        const XctTroops       = 1 << 5;
        const ScubaTroops     = 1 << 6;
        const ParamedicTroops = 1 << 7;
    }
}

// Augmentation {{{1
bitflags! {
    /// Manei Domini style cybernetic augmentation of the troopers.
    ///
    #[derive(PartialEq, Eq, Serialize, Deserialize, Default, Debug, Clone, Copy)]
    pub struct Augmentation: u32 {
        const ExtraLimbs       = 1 << 0;
        const HeavyProsthetics = 1 << 1;
        const DermalArmor      = 1 << 2;
        const CyberEyes        = 1 << 3;
    }
}

impl Augmentation { // {{{2
    // secondary_modifier {{{3
    /// Change to the secondary weapons a squad may carry.
    ///
    pub fn secondary_modifier(&self) -> i32 {
        let mut modifier = 0;
        if self.contains(Self::ExtraLimbs)       { modifier += 1; }
        if self.contains(Self::HeavyProsthetics) { modifier -= 1; }

        modifier
    }
}

// InfantryData {{{1
/// Conventional infantry platoon details.
///
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InfantryData {
    pub squad_size: u32,
    pub squads: u32,
    /// Secondary weapons carried per squad.
    #[serde(default)]
    pub secondary_weapons: u32,
    /// Troopers needed to crew each secondary weapon.
    #[serde(default = "default_secondary_crew")]
    pub secondary_crew: u32,
    /// VTOL or UMU infantry using the alternate configuration.
    #[serde(default)]
    pub alt_mode: bool,
    #[serde(default)]
    pub mount: Option<InfantryMount>,
    #[serde(default)]
    pub specializations: InfantrySpecialization,
    #[serde(default)]
    pub augmentations: Augmentation,
}

fn default_secondary_crew() -> u32 { 1 }

impl InfantryData { // {{{2
    // troopers {{{3
    pub fn troopers(&self) -> u32 {
        self.squad_size.saturating_mul(self.squads)
    }

    // is_engineer_or_mountain {{{3
    pub fn is_engineer_or_mountain(&self) -> bool {
        self.specializations.intersects(
            InfantrySpecialization::CombatEngineers | InfantrySpecialization::MountainTroops
        )
    }
}

// ProtomechData {{{1
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ProtomechData {
    pub quad: bool,
    pub glider: bool,
    pub ultraheavy: bool,
    pub main_gun: bool,
    pub walk_mp: u32,
    pub heat_sinks: u32,
}

// BuildingData {{{1
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct BuildingData {
    /// Construction factor.
    pub cf: u32,
}
