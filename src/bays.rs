use crate::{TechAdvancement, TechBase, TechLevel, UnitCategory};

use serde::{Serialize, Deserialize};

use std::fmt;

// BattleArmorVariant {{{1
/// Battle armor bays differ in size by the armor they are built for.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum BattleArmorVariant {
    #[default]
    InnerSphere,
    Clan,
    ComStar,
}

impl BattleArmorVariant { // {{{2
    const RATIO_EPSILON: f64 = 1e-6;

    // from_weight_ratio {{{3
    /// Recover the variant from a bay's tons per suit. Only an exact 12 or 10
    /// picks ComStar or Clan.
    ///
    pub fn from_weight_ratio(ratio: f64) -> Self {
        if (ratio - 12.0).abs() < Self::RATIO_EPSILON {
            Self::ComStar
        } else if (ratio - 10.0).abs() < Self::RATIO_EPSILON {
            Self::Clan
        } else {
            Self::InnerSphere
        }
    }
}

// QuartersType {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum QuartersType {
    FirstClass,
    SecondClass,
    #[default]
    Crew,
    Steerage,
}

impl QuartersType { // {{{2
    // wgt_per_occupant {{{3
    pub fn wgt_per_occupant(&self) -> f64 {
        match self {
            Self::FirstClass  => 10.0,
            Self::SecondClass => 7.0,
            Self::Crew        => 7.0,
            Self::Steerage    => 5.0,
        }
    }
}

// BayKind {{{1
/// What a transport bay holds.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum BayKind {
    Mech,
    Protomech,
    HeavyVehicle,
    LightVehicle,
    SuperheavyVehicle,
    InfantryFoot,
    InfantryJump,
    InfantryMotorized,
    InfantryMechanized,
    BattleArmor(BattleArmorVariant),
    Fighter,
    SmallCraft,
    Cargo,
    LiquidCargo,
    RefrigeratedCargo,
    InsulatedCargo,
    LivestockCargo,
    CrewQuarters(QuartersType),
}

// Bay {{{1
/// A transport bay mounted on a unit.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Bay {
    pub kind: BayKind,
    /// Units carried, or tons for cargo bays, or occupants for quarters.
    pub capacity: f64,
    pub doors: u32,
    pub bay_number: u32,
}

impl Bay { // {{{2
    // wgt {{{3
    /// Weight of the bay itself.
    ///
    pub fn wgt(&self) -> f64 {
        match (BayData::classify(self), self.kind) {
            (Some(data), _) => self.capacity * data.weight(),
            (None, BayKind::CrewQuarters(quarters)) => self.capacity * quarters.wgt_per_occupant(),
            (None, _) => 0.0,
        }
    }

    // personnel {{{3
    /// Crew needed to run the bay.
    ///
    pub fn personnel(&self) -> u32 {
        match BayData::classify(self) {
            Some(data) => (self.capacity * data.personnel()).ceil() as u32,
            None => 0,
        }
    }
}

// BayData {{{1
/// Catalog of transport bay categories.
///
/// Categories from `Cargo` on are cargo bays.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum BayData {
    Mech,
    Protomech,
    HeavyVehicle,
    LightVehicle,
    SuperheavyVehicle,
    InfantryFoot,
    InfantryJump,
    InfantryMotorized,
    InfantryMechanized,
    IsBattleArmor,
    ClanBattleArmor,
    CsBattleArmor,
    Fighter,
    SmallCraft,
    Cargo,
    LiquidCargo,
    RefrigeratedCargo,
    InsulatedCargo,
    LivestockCargo,
}

/// A catalog entry.
///
struct BayRecord {
    data: BayData,
    name: &'static str,
    /// Tons per unit of capacity.
    weight: f64,
    /// Crew per unit of capacity.
    personnel: f64,
    tech: TechAdvancement,
    cargo: bool,
}

const fn tech(base: TechBase, level: TechLevel, intro_year: u32) -> TechAdvancement {
    TechAdvancement::new(base, level, intro_year)
}

static CATALOG: [BayRecord; 19] = [
    BayRecord { data: BayData::Mech,               name: "Mech",                  weight: 150.0,       personnel: 2.0,  tech: tech(TechBase::All, TechLevel::Standard, 2445),          cargo: false },
    BayRecord { data: BayData::Protomech,          name: "ProtoMech",             weight: 50.0,        personnel: 6.0,  tech: tech(TechBase::Clan, TechLevel::Advanced, 3066),        cargo: false },
    BayRecord { data: BayData::HeavyVehicle,       name: "Heavy Vehicle",         weight: 100.0,       personnel: 8.0,  tech: tech(TechBase::All, TechLevel::Standard, 2470),          cargo: false },
    BayRecord { data: BayData::LightVehicle,       name: "Light Vehicle",         weight: 50.0,        personnel: 5.0,  tech: tech(TechBase::All, TechLevel::Standard, 2470),          cargo: false },
    BayRecord { data: BayData::SuperheavyVehicle,  name: "Superheavy Vehicle",    weight: 200.0,       personnel: 15.0, tech: tech(TechBase::All, TechLevel::Advanced, 3057),          cargo: false },
    BayRecord { data: BayData::InfantryFoot,       name: "Foot Infantry",         weight: 5.0,         personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 2460),          cargo: false },
    BayRecord { data: BayData::InfantryJump,       name: "Jump Infantry",         weight: 6.0,         personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 2460),          cargo: false },
    BayRecord { data: BayData::InfantryMotorized,  name: "Motorized Infantry",    weight: 7.0,         personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 2460),          cargo: false },
    BayRecord { data: BayData::InfantryMechanized, name: "Mechanized Infantry",   weight: 8.0,         personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 2460),          cargo: false },
    BayRecord { data: BayData::IsBattleArmor,      name: "IS Battle Armor",       weight: 8.0,         personnel: 6.0,  tech: tech(TechBase::InnerSphere, TechLevel::Standard, 3050),  cargo: false },
    BayRecord { data: BayData::ClanBattleArmor,    name: "Clan Battle Armor",     weight: 10.0,        personnel: 6.0,  tech: tech(TechBase::Clan, TechLevel::Standard, 3050),         cargo: false },
    BayRecord { data: BayData::CsBattleArmor,      name: "ComStar Battle Armor",  weight: 12.0,        personnel: 6.0,  tech: tech(TechBase::InnerSphere, TechLevel::Advanced, 3053),  cargo: false },
    BayRecord { data: BayData::Fighter,            name: "Fighter",               weight: 150.0,       personnel: 2.0,  tech: tech(TechBase::All, TechLevel::Standard, 2470),          cargo: false },
    BayRecord { data: BayData::SmallCraft,         name: "Small Craft",           weight: 200.0,       personnel: 5.0,  tech: tech(TechBase::All, TechLevel::Standard, 2470),          cargo: false },
    BayRecord { data: BayData::Cargo,              name: "Cargo",                 weight: 1.0,         personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Introductory, 1950),      cargo: true },
    BayRecord { data: BayData::LiquidCargo,        name: "Liquid Cargo",          weight: 1.0 / 0.91,  personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 1950),          cargo: true },
    BayRecord { data: BayData::RefrigeratedCargo,  name: "Refrigerated Cargo",    weight: 1.0 / 0.87,  personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 1950),          cargo: true },
    BayRecord { data: BayData::InsulatedCargo,     name: "Insulated Cargo",       weight: 1.0 / 0.87,  personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 1950),          cargo: true },
    BayRecord { data: BayData::LivestockCargo,     name: "Livestock Cargo",       weight: 1.0 / 0.83,  personnel: 0.0,  tech: tech(TechBase::All, TechLevel::Standard, 1950),          cargo: true },
];

impl BayData { // {{{2
    // all {{{3
    /// Every catalog entry in catalog order.
    ///
    pub fn all() -> impl Iterator<Item = BayData> {
        CATALOG.iter().map(|r| r.data)
    }

    fn record(&self) -> &'static BayRecord {
        &CATALOG[*self as usize]
    }

    // name {{{3
    pub fn name(&self) -> &'static str {
        self.record().name
    }

    // weight {{{3
    /// Tons per unit of capacity.
    ///
    pub fn weight(&self) -> f64 {
        self.record().weight
    }

    // personnel {{{3
    /// Crew per unit of capacity.
    ///
    pub fn personnel(&self) -> f64 {
        self.record().personnel
    }

    // tech {{{3
    pub fn tech(&self) -> TechAdvancement {
        self.record().tech
    }

    // is_cargo_bay {{{3
    pub fn is_cargo_bay(&self) -> bool {
        self.record().cargo
    }

    // bay_kind {{{3
    fn bay_kind(&self) -> BayKind {
        match self {
            Self::Mech               => BayKind::Mech,
            Self::Protomech          => BayKind::Protomech,
            Self::HeavyVehicle       => BayKind::HeavyVehicle,
            Self::LightVehicle       => BayKind::LightVehicle,
            Self::SuperheavyVehicle  => BayKind::SuperheavyVehicle,
            Self::InfantryFoot       => BayKind::InfantryFoot,
            Self::InfantryJump       => BayKind::InfantryJump,
            Self::InfantryMotorized  => BayKind::InfantryMotorized,
            Self::InfantryMechanized => BayKind::InfantryMechanized,
            Self::IsBattleArmor      => BayKind::BattleArmor(BattleArmorVariant::InnerSphere),
            Self::ClanBattleArmor    => BayKind::BattleArmor(BattleArmorVariant::Clan),
            Self::CsBattleArmor      => BayKind::BattleArmor(BattleArmorVariant::ComStar),
            Self::Fighter            => BayKind::Fighter,
            Self::SmallCraft         => BayKind::SmallCraft,
            Self::Cargo              => BayKind::Cargo,
            Self::LiquidCargo        => BayKind::LiquidCargo,
            Self::RefrigeratedCargo  => BayKind::RefrigeratedCargo,
            Self::InsulatedCargo     => BayKind::InsulatedCargo,
            Self::LivestockCargo     => BayKind::LivestockCargo,
        }
    }

    // new_bay {{{3
    /// Build a bay of this category.
    ///
    pub fn new_bay(&self, size: f64, bay_number: u32) -> Bay {
        Bay { kind: self.bay_kind(), capacity: size, doors: 1, bay_number }
    }

    // classify {{{3
    /// Catalog entry matching a bay. Crew quarters match none.
    ///
    pub fn classify(bay: &Bay) -> Option<BayData> {
        Self::all().find(|data| data.bay_kind() == bay.kind)
    }

    // is_legal_for {{{3
    /// Return true if a unit of the category may carry this kind of bay.
    ///
    pub fn is_legal_for(&self, category: UnitCategory) -> bool {
        match category {
            UnitCategory::Mek => self.is_cargo_bay() && *self != Self::LivestockCargo,
            UnitCategory::Tank => true,
            c if c.is_aerospace() => true,
            _ => false,
        }
    }
}

impl fmt::Display for BayData { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
