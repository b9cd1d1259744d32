use crate::Ceil;
use crate::error::Result;

use derive_builder::Builder;
use serde::{Serialize, Deserialize};

use std::fs;

// TestEntityOption {{{1
/// Rounding and reporting settings for one verification run.
///
#[derive(PartialEq, Serialize, Deserialize, Builder, Clone, Debug)]
#[builder(default, build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct TestEntityOption {
    pub ceil_engine: Ceil,
    pub ceil_structure: Ceil,
    pub ceil_armor: Ceil,
    pub ceil_controls: Ceil,
    pub ceil_weapons: Ceil,
    pub ceil_target_computer: Ceil,
    /// Mek gyros. No unit type verified here mounts one.
    pub ceil_gyro: Ceil,
    pub ceil_turret: Ceil,
    pub ceil_lifting: Ceil,
    pub ceil_power_amp: Ceil,

    /// Allowed excess weight as a fraction of declared tonnage.
    pub max_overweight: f64,
    /// Allowed missing weight as a fraction of declared tonnage.
    pub max_underweight: f64,

    pub show_overweight: bool,
    pub show_underweight: bool,
    pub show_failed_equip: bool,
    pub show_incorrect_intro_year: bool,
    pub show_correct_armor: bool,
    pub show_correct_criticals: bool,

    /// Years equipment may predate its introduction before it is flagged.
    pub intro_year_margin: u32,
    /// Unresolved equipment names that are not reported.
    pub ignore_failed_equip: Vec<String>,
    /// Skip verification entirely.
    pub skip: bool,
}

impl Default for TestEntityOption { // {{{2
    fn default() -> Self {
        Self {
            ceil_engine:          Ceil::HalfTon,
            ceil_structure:       Ceil::HalfTon,
            ceil_armor:           Ceil::HalfTon,
            ceil_controls:        Ceil::HalfTon,
            ceil_weapons:         Ceil::HalfTon,
            ceil_target_computer: Ceil::Ton,
            ceil_gyro:            Ceil::HalfTon,
            ceil_turret:          Ceil::HalfTon,
            ceil_lifting:         Ceil::HalfTon,
            ceil_power_amp:       Ceil::HalfTon,

            max_overweight:  0.0,
            max_underweight: 0.0,

            show_overweight:           true,
            show_underweight:          false,
            show_failed_equip:         true,
            show_incorrect_intro_year: true,
            show_correct_armor:        true,
            show_correct_criticals:    true,

            intro_year_margin:   5,
            ignore_failed_equip: Vec::new(),
            skip:                false,
        }
    }
}

impl TestEntityOptionBuilder { // {{{2
    // validate {{{3
    fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [("max_overweight", self.max_overweight), ("max_underweight", self.max_underweight)] {
            if let Some(v) = value {
                if ! (0.0..=1.0).contains(&v) {
                    return Err(format!("{} must be a fraction between 0 and 1, not {}", name, v));
                }
            }
        }

        Ok(())
    }
}

impl TestEntityOption { // {{{2
    // load {{{3
    /// Load options from a file.
    ///
    pub fn load(p: &str) -> Result<TestEntityOption> {
        let s = fs::read_to_string(p)?;
        let options = serde_json::from_str(&s)?;

        Ok(options)
    }

    // save {{{3
    /// Save options to a file.
    ///
    pub fn save(&self, p: &str) -> Result<()> {
        let s = serde_json::to_string_pretty(&self)?;
        fs::write(p, s)?;

        Ok(())
    }

    // to_kilo {{{3
    /// The same options with every ceiling set to the kilogram.
    ///
    pub fn to_kilo(&self) -> TestEntityOption {
        TestEntityOption {
            ceil_engine:          Ceil::Kilo,
            ceil_structure:       Ceil::Kilo,
            ceil_armor:           Ceil::Kilo,
            ceil_controls:        Ceil::Kilo,
            ceil_weapons:         Ceil::Kilo,
            ceil_target_computer: Ceil::Kilo,
            ceil_gyro:            Ceil::Kilo,
            ceil_turret:          Ceil::Kilo,
            ceil_lifting:         Ceil::Kilo,
            ceil_power_amp:       Ceil::Kilo,
            ..self.clone()
        }
    }

    // ignores_failed {{{3
    /// Return true if an unresolved equipment name is on the ignore list.
    ///
    pub fn ignores_failed(&self, name: &str) -> bool {
        self.ignore_failed_equip.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

// Testing {{{1
#[cfg(test)]
mod test_entity_option {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = TestEntityOptionBuilder::default().build().unwrap();

        assert_eq!(TestEntityOption::default(), built);
    }

    #[test]
    fn builder_sets_fields() {
        let built = TestEntityOptionBuilder::default()
            .ceil_armor(Ceil::Kilo)
            .show_underweight(true)
            .build()
            .unwrap();

        assert_eq!(Ceil::Kilo, built.ceil_armor);
        assert!(built.show_underweight);
        assert_eq!(Ceil::HalfTon, built.ceil_engine);
    }

    #[test]
    fn builder_rejects_bad_tolerance() {
        let built = TestEntityOptionBuilder::default()
            .max_overweight(1.5)
            .build();

        assert!(built.is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let options: TestEntityOption = serde_json::from_str(r#"{"ceil_turret": "Kilo", "skip": true}"#).unwrap();

        assert_eq!(Ceil::Kilo, options.ceil_turret);
        assert!(options.skip);
        assert_eq!(Ceil::Ton, options.ceil_target_computer);
    }

    #[test]
    fn to_kilo_keeps_toggles() {
        let options = TestEntityOption { show_underweight: true, ..Default::default() }.to_kilo();

        assert_eq!(Ceil::Kilo, options.ceil_engine);
        assert_eq!(Ceil::Kilo, options.ceil_power_amp);
        assert_eq!(Ceil::Kilo, options.ceil_gyro);
        assert!(options.show_underweight);
    }

    #[test]
    fn ignores_failed_case_insensitively() {
        let options = TestEntityOption { ignore_failed_equip: vec!["Jury Rig".into()], ..Default::default() };

        assert!(options.ignores_failed("jury rig"));
        assert!(! options.ignores_failed("Mystery Box"));
    }
}
