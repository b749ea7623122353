//! Structural checks on a parameter set
//!
//! Passband-dependent parameters are named `<base>_<passband>` and must exist
//! for every combination of base name and passband.

use crate::error::{Result, TransitError};
use crate::parameters::parameter::Scope;
use crate::parameters::parameter_set::ParameterSet;
use log::warn;
use std::collections::HashSet;

/// Separator between the base name and the passband of a passband parameter
pub const PASSBAND_SEPARATOR: char = '_';

/// Split a passband parameter name into `(base, passband)`
///
/// Returns `None` unless the name contains exactly one separator.
///
/// ```
/// use transit_params::parameters::split_passband_name;
///
/// assert_eq!(split_passband_name("k2_g"), Some(("k2", "g")));
/// assert_eq!(split_passband_name("k2"), None);
/// assert_eq!(split_passband_name("q1_sdss_g"), None);
/// ```
pub fn split_passband_name(name: &str) -> Option<(&str, &str)> {
    let (base, passband) = name.split_once(PASSBAND_SEPARATOR)?;
    if passband.contains(PASSBAND_SEPARATOR) {
        return None;
    }
    Some((base, passband))
}

/// Distinct values in first-seen order
fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

impl ParameterSet {
    /// Check the naming and coverage rules of the set
    ///
    /// Fails with
    /// - [`TransitError::DuplicateName`] if two parameters share a name,
    /// - [`TransitError::NamingConvention`] if a passband parameter is not named
    ///   `<base>_<passband>`,
    /// - [`TransitError::IncompleteCoverage`] if some base × passband combination
    ///   has no parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::{Parameter, ParameterSet, Scope};
    ///
    /// let mut ps = ParameterSet::new();
    /// for name in ["k1_g", "k1_r", "k2_g"] {
    ///     ps.append(Parameter::new(name, Scope::Passband).unwrap()).unwrap();
    /// }
    /// assert!(ps.validate().is_err());
    ///
    /// ps.append(Parameter::new("k2_r", Scope::Passband).unwrap()).unwrap();
    /// assert!(ps.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.check_unique_names()
            .and_then(|_| self.check_passband_coverage())
            .map_err(|e| {
                warn!("parameter set validation failed: {}", e);
                e
            })
    }

    fn check_unique_names(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.len());
        for p in self {
            if !seen.insert(p.name()) {
                return Err(TransitError::DuplicateName(format!(
                    "'{}' appears more than once",
                    p.name()
                )));
            }
        }
        Ok(())
    }

    fn check_passband_coverage(&self) -> Result<()> {
        let mut split = Vec::new();
        for p in self.iter().filter(|p| p.scope() == Scope::Passband) {
            match split_passband_name(p.name()) {
                Some(parts) => split.push(parts),
                None => {
                    return Err(TransitError::NamingConvention(format!(
                        "passband parameter '{}' must be named <parameter>{}<passband>",
                        p.name(),
                        PASSBAND_SEPARATOR
                    )))
                }
            }
        }

        let bases = unique_in_order(split.iter().map(|(base, _)| *base));
        let passbands = unique_in_order(split.iter().map(|(_, pb)| *pb));
        let present: HashSet<(&str, &str)> = split.iter().copied().collect();

        for base in &bases {
            for pb in &passbands {
                if !present.contains(&(*base, *pb)) {
                    return Err(TransitError::IncompleteCoverage(format!(
                        "missing '{}{}{}': passband parameters must exist for all {} passbands",
                        base,
                        PASSBAND_SEPARATOR,
                        pb,
                        passbands.len()
                    )));
                }
            }
        }
        Ok(())
    }
}
