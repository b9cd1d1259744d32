use crate::{EquipmentFlags, Location, MovementMode};
use crate::unit::{Mounted, TurretConfig};

// legal_for_motive_type {{{1
/// Return true if a vehicle with the given movement mode may mount the
/// equipment at all.
///
pub fn legal_for_motive_type(mounted: &Mounted, movement: MovementMode, support: bool) -> bool {
    use MovementMode as M;

    let flags = mounted.flags;
    let ground = movement.is_ground();

    if flags.contains(EquipmentFlags::JumpJet) && ! ground { return false; }
    if flags.contains(EquipmentFlags::Umu) { return false; }

    if flags.intersects(EquipmentFlags::MastMount | EquipmentFlags::VtolJetBooster) && movement != M::Vtol {
        return false;
    }

    if flags.contains(EquipmentFlags::Bulldozer) &&
        (matches!(movement, M::Vtol | M::Hover | M::Wige) || movement.is_marine())
    {
        return false;
    }

    if flags.contains(EquipmentFlags::Minesweeper) && matches!(movement, M::Vtol | M::Submarine | M::Wige) {
        return false;
    }

    if flags.contains(EquipmentFlags::FlotationHull) && ! (ground || movement == M::Vtol) { return false; }
    if flags.is_amphibious() && ! ground { return false; }
    if flags.contains(EquipmentFlags::DuneBuggy) && movement != M::Wheeled { return false; }
    if flags.contains(EquipmentFlags::BridgeLayer) && ! ground { return false; }

    if flags.contains(EquipmentFlags::ArmoredMotive) && matches!(movement, M::Vtol | M::Wige) {
        return false;
    }

    if flags.contains(EquipmentFlags::TrailerHitch) && (movement == M::Vtol || movement.is_marine()) {
        return false;
    }

    if flags.contains(EquipmentFlags::SponsonTurret) && matches!(movement, M::Vtol | M::Wige) {
        return false;
    }

    if flags.contains(EquipmentFlags::PintleTurret) && ! support { return false; }
    if flags.contains(EquipmentFlags::Torpedo) && ! movement.is_marine() { return false; }

    true
}

// is_valid_tank_location {{{1
/// Return true if the equipment may be placed in a vehicle location.
///
pub fn is_valid_tank_location(
    mounted: &Mounted,
    loc: Location,
    movement: MovementMode,
    turret: TurretConfig,
    superheavy: bool,
) -> bool {
    if loc.is_protomech() { return false; }

    let body_only = mounted.flags.is_body_only() || mounted.is_ammo();
    if body_only { return loc == Location::Body; }

    // The rotor holds only the mast mount, which goes nowhere else
    if mounted.has(EquipmentFlags::MastMount) {
        return loc == Location::Rotor && movement == MovementMode::Vtol;
    }

    match loc {
        Location::Rotor   => false,
        Location::Turret  => turret.count() >= 1,
        Location::Turret2 => turret.count() >= 2,

        Location::Right | Location::Left => ! superheavy,
        l if l.is_superheavy_only() => superheavy,

        _ => true,
    }
}
