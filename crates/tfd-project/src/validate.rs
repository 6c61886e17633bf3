//! Project validation and audit logic.
//!
//! Validation distinguishes two severities:
//! - hard errors ([`validate_project`]): the file is malformed and must not
//!   be loaded (duplicate names, non-finite bounds, zero poll intervals)
//! - audit findings ([`audit_project`]): entries that load fine but will be
//!   silently dropped by the fader factory, with the reason why

use std::collections::HashSet;
use std::fmt;

use crate::schema::{FaderDef, Project};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate fader name: {name}")]
    DuplicateName { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut names = HashSet::new();
    for fader in &project.faders {
        if !names.insert(&fader.name) {
            return Err(ValidationError::DuplicateName {
                name: fader.name.clone(),
            });
        }
        validate_fader(fader)?;
    }

    Ok(())
}

fn validate_fader(fader: &FaderDef) -> Result<(), ValidationError> {
    validate_finite("min_fade_temp", fader.min_fade_temp, &fader.name)?;
    validate_finite("max_fade_temp", fader.max_fade_temp, &fader.name)?;

    for (field, ticks) in [
        ("heatup_poll", fader.heatup_poll),
        ("cooldown_poll", fader.cooldown_poll),
        ("fading_poll", fader.fading_poll),
    ] {
        if ticks == 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("fader '{}' {}", fader.name, field),
                value: ticks.to_string(),
                reason: "poll intervals must be at least one tick".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_finite(field: &str, value: f64, fader_name: &str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("fader '{}' {}", fader_name, field),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

/// Why the factory will drop an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Enable flag is false.
    Disabled,
    /// No designator and the entry name carries no legacy default.
    NoDesignator,
    /// Neither `switch` nor the deprecated `device` field is set.
    NoSwitch,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Disabled => write!(f, "disabled (enable: false)"),
            DropReason::NoDesignator => write!(f, "no designator configured"),
            DropReason::NoSwitch => write!(f, "no switch configured"),
        }
    }
}

/// Audit finding for one statically droppable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFinding {
    pub fader_name: String,
    pub reason: DropReason,
}

/// Report entries the factory is certain to drop, with reasons.
///
/// Only statically determinable drops appear here; entries that die at
/// resolution time (no sensors carry the designator, switch name not
/// registered) depend on the device registry and cannot be audited from the
/// file alone.
pub fn audit_project(project: &Project) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for fader in &project.faders {
        let reason = if !fader.enable {
            Some(DropReason::Disabled)
        } else if fader.resolved_designator().is_none() {
            Some(DropReason::NoDesignator)
        } else if fader.resolved_switch().is_none() {
            Some(DropReason::NoSwitch)
        } else {
            None
        };

        if let Some(reason) = reason {
            findings.push(AuditFinding {
                fader_name: fader.name.clone(),
                reason,
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fader(name: &str) -> FaderDef {
        serde_yaml::from_str(&format!("name: {name}")).unwrap()
    }

    fn project(faders: Vec<FaderDef>) -> Project {
        Project {
            version: 1,
            name: "test".to_string(),
            faders,
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let p = project(vec![fader("fan"), fader("fan")]);
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateName { .. })
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut p = project(vec![]);
        p.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn non_finite_temp_rejected() {
        let mut f = fader("fan");
        f.max_fade_temp = f64::NAN;
        assert!(matches!(
            validate_project(&project(vec![f])),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_poll_rejected() {
        let mut f = fader("fan");
        f.fading_poll = 0;
        assert!(matches!(
            validate_project(&project(vec![f])),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn audit_reports_disabled_first() {
        // A disabled entry with other problems reports only "disabled";
        // the factory never looks further than the enable flag.
        let f = fader("fan");
        let findings = audit_project(&project(vec![f]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].reason, DropReason::Disabled);
    }

    #[test]
    fn audit_reports_missing_designator_and_switch() {
        let mut no_desig = fader("fan");
        no_desig.enable = true;
        no_desig.switch = "out".to_string();

        let mut no_switch = fader("hotend");
        no_switch.enable = true;

        let findings = audit_project(&project(vec![no_desig, no_switch]));
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].reason, DropReason::NoDesignator);
        assert_eq!(findings[1].reason, DropReason::NoSwitch);
    }

    #[test]
    fn audit_passes_complete_entry() {
        let mut f = fader("hotend");
        f.enable = true;
        f.device = "fan".to_string(); // legacy alias is enough
        assert!(audit_project(&project(vec![f])).is_empty());
    }
}
