//! Server cvar snapshot and restore
//!
//! Wave mode turns off the server's team balancing. The values in effect
//! before that are captured on enable and written back on disable.

use botwaves_host::Host;

use crate::config::WaveConfig;
use crate::logging::CVAR;
use crate::server::{self, ServerCommand};

/// Cvar overridden by wave mode, with its engine default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedCvar {
    /// Console variable name
    pub name: &'static str,
    /// Value when the host cannot report the current one
    pub default: &'static str,
    /// Value while wave mode is active (`None` = not overridden)
    pub wave_value: Option<&'static str>,
}

/// Team-balance cvars, always managed
pub const BALANCE_CVARS: &[ManagedCvar] = &[
    ManagedCvar {
        name: "mp_autoteambalance",
        default: "1",
        wave_value: Some("0"),
    },
    ManagedCvar {
        name: "mp_limitteams",
        default: "2",
        wave_value: Some("0"),
    },
    ManagedCvar {
        name: "mp_teambalance_enabled",
        default: "1",
        wave_value: Some("0"),
    },
    ManagedCvar {
        name: "mp_force_pick_time",
        default: "15",
        wave_value: Some("0"),
    },
    ManagedCvar {
        name: "mp_roundtime",
        default: "1.92",
        wave_value: None,
    },
];

/// Skill auto-balance from a companion plugin; managed when configured
pub const SKILL_BALANCE_CVAR: ManagedCvar = ManagedCvar {
    name: "css_skill_autobalance_minplayers",
    default: "0",
    wave_value: Some("30"),
};

/// Cvars managed under `config`, in a fixed order
pub fn managed(config: &WaveConfig) -> Vec<ManagedCvar> {
    let mut cvars = BALANCE_CVARS.to_vec();
    if config.disable_skill_auto_balance {
        cvars.push(SKILL_BALANCE_CVAR);
    }
    cvars
}

/// Capture the current value of every managed cvar
///
/// Values the host cannot read fall back to the engine default.
pub fn snapshot<H: Host + ?Sized>(host: &H, config: &WaveConfig) -> Vec<(String, String)> {
    managed(config)
        .into_iter()
        .map(|cvar| {
            let value = host.read_cvar(cvar.name).unwrap_or_else(|| {
                tracing::debug!(target: CVAR, "{} not readable, assuming {}", cvar.name, cvar.default);
                cvar.default.to_string()
            });
            tracing::debug!(target: CVAR, "Saved {} = {}", cvar.name, value);
            (cvar.name.to_string(), value)
        })
        .collect()
}

fn override_command(cvar: &ManagedCvar) -> Option<ServerCommand> {
    cvar.wave_value
        .map(|value| ServerCommand::SetCvar(cvar.name.to_string(), value.to_string()))
}

/// Commands that switch off team balancing for wave mode
pub fn balance_overrides() -> Vec<ServerCommand> {
    BALANCE_CVARS.iter().filter_map(override_command).collect()
}

/// Command that neutralises skill auto-balance, when configured
pub fn skill_balance_override(config: &WaveConfig) -> Option<ServerCommand> {
    if config.disable_skill_auto_balance {
        override_command(&SKILL_BALANCE_CVAR)
    } else {
        None
    }
}

/// Write back a snapshot, consuming it
pub fn restore<H: Host + ?Sized>(host: &mut H, saved: &mut Vec<(String, String)>) {
    for (name, value) in saved.drain(..) {
        tracing::debug!(target: CVAR, "Restoring {} = {}", name, value);
        server::run(host, ServerCommand::SetCvar(name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botwaves_host::RecordingHost;

    #[test]
    fn test_snapshot_prefers_host_values() {
        let mut host = RecordingHost::new();
        host.set_cvar("mp_limitteams", "5");
        let config = WaveConfig::default();

        let saved = snapshot(&host, &config);
        assert_eq!(saved.len(), 6);
        assert!(saved.contains(&("mp_limitteams".to_string(), "5".to_string())));
        assert!(saved.contains(&("mp_autoteambalance".to_string(), "1".to_string())));
        assert!(saved.contains(&("mp_roundtime".to_string(), "1.92".to_string())));
    }

    #[test]
    fn test_skill_balance_is_optional() {
        let config = WaveConfig {
            disable_skill_auto_balance: false,
            ..WaveConfig::default()
        };
        assert!(managed(&config).iter().all(|c| c.name != SKILL_BALANCE_CVAR.name));
        assert_eq!(skill_balance_override(&config), None);
        assert_eq!(
            skill_balance_override(&WaveConfig::default()).map(|c| c.to_string()),
            Some("css_skill_autobalance_minplayers 30".to_string())
        );
    }

    #[test]
    fn test_overrides_skip_roundtime() {
        let rendered: Vec<String> = balance_overrides().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "mp_autoteambalance 0",
                "mp_limitteams 0",
                "mp_teambalance_enabled 0",
                "mp_force_pick_time 0",
            ]
        );
    }

    #[test]
    fn test_restore_drains() {
        let mut host = RecordingHost::new();
        let mut saved = vec![("mp_limitteams".to_string(), "2".to_string())];
        restore(&mut host, &mut saved);
        assert!(saved.is_empty());
        assert_eq!(host.commands, vec!["mp_limitteams 2"]);
    }
}
