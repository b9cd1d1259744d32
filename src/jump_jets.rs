use serde::{Serialize, Deserialize};

use std::fmt;

// JumpType {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum JumpType {
    None,
    Standard,
    Improved,
    Prototype,
    PrototypeImproved,
}

// MekJumpJets {{{1
/// Jump jet varieties.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum MekJumpJets {
    Standard,
    Improved,
    Prototype,
    PrototypeImproved,
    Umu,
}

impl MekJumpJets { // {{{2
    const ALL: [MekJumpJets; 5] = [
        Self::Standard,
        Self::Improved,
        Self::Prototype,
        Self::PrototypeImproved,
        Self::Umu,
    ];

    // all {{{3
    pub fn all() -> impl Iterator<Item = MekJumpJets> {
        Self::ALL.into_iter()
    }

    // internal_name {{{3
    /// Name used to look the equipment up.
    ///
    pub fn internal_name(&self) -> &'static str {
        match self {
            Self::Standard          => "JumpJet",
            Self::Improved          => "ImprovedJump Jet",
            Self::Prototype         => "PrototypeJumpJet",
            Self::PrototypeImproved => "PrototypeImprovedJJ",
            Self::Umu               => "UMU",
        }
    }

    // is_industrial {{{3
    /// Return true if industrial units may mount this type.
    ///
    pub fn is_industrial(&self) -> bool {
        matches!(self, Self::Standard | Self::Prototype)
    }

    // jump_type {{{3
    pub fn jump_type(&self) -> JumpType {
        match self {
            Self::Standard          => JumpType::Standard,
            Self::Improved          => JumpType::Improved,
            Self::Prototype         => JumpType::Prototype,
            Self::PrototypeImproved => JumpType::PrototypeImproved,
            Self::Umu               => JumpType::None,
        }
    }

    // from_internal_name {{{3
    pub fn from_internal_name(name: &str) -> Option<MekJumpJets> {
        Self::all().find(|jj| jj.internal_name() == name)
    }
}

impl fmt::Display for MekJumpJets { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.internal_name())
    }
}

// all_jjs {{{1
/// Internal names of every jump jet type, or only the industrial ones.
///
pub fn all_jjs(industrial_only: bool) -> Vec<&'static str> {
    MekJumpJets::all()
        .filter(|jj| ! industrial_only || jj.is_industrial())
        .map(|jj| jj.internal_name())
        .collect()
}
