//! Session configuration.

use crate::character::skills::SkillType;
use crate::character::vocation::Vocation;
use crate::commands::Command;
use crate::core::constants::{AUTOSAVE_INTERVAL_SECONDS, TICK_INTERVAL_MS};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("help requested")]
    HelpRequested,

    #[error("missing account name")]
    MissingAccount,

    #[error("{0} needs a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Activity to start right after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartActivity {
    Hunt { monster_id: String, group_size: u32 },
    Boss { boss_id: String },
    Train { skill: SkillType },
}

impl StartActivity {
    pub fn to_command(&self) -> Command {
        match self {
            StartActivity::Hunt {
                monster_id,
                group_size,
            } => Command::StartHunt {
                monster_id: monster_id.clone(),
                is_boss: false,
                group_size: *group_size,
            },
            StartActivity::Boss { boss_id } => Command::StartHunt {
                monster_id: boss_id.clone(),
                is_boss: true,
                group_size: 1,
            },
            StartActivity::Train { skill } => Command::StartTraining { skill: *skill },
        }
    }
}

/// Configuration for one headless session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub account: String,

    /// Character name to register with when the account has no save.
    pub new_name: Option<String>,

    pub vocation: Option<Vocation>,

    pub start: Option<StartActivity>,

    /// Stop after this many ticks (None = run until interrupted)
    pub max_ticks: Option<u64>,

    /// Save directory (None = platform data directory)
    pub save_dir: Option<PathBuf>,

    pub tick_interval_ms: u64,

    pub autosave_interval_seconds: u64,

    /// Log verbosity (0 = warnings, 1 = info, 2 = debug)
    pub verbosity: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            new_name: None,
            vocation: None,
            start: None,
            max_ticks: None,
            save_dir: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            autosave_interval_seconds: AUTOSAVE_INTERVAL_SECONDS,
            verbosity: 0,
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, ConfigError> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

impl EngineConfig {
    /// Parses `idlehunt <account> [options]`. `args[0]` is the program name.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = EngineConfig::default();
        let mut group_size = 1;
        let mut account = None;

        let mut i = 1;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "-v" | "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
                "--new" => config.new_name = Some(value(args, &mut i, arg)?.to_string()),
                "--vocation" => {
                    let v = value(args, &mut i, arg)?;
                    config.vocation = Some(Vocation::parse(v).ok_or_else(|| invalid(arg, v))?);
                }
                "--hunt" => {
                    config.start = Some(StartActivity::Hunt {
                        monster_id: value(args, &mut i, arg)?.to_string(),
                        group_size: 1,
                    });
                }
                "--group" => {
                    let v = value(args, &mut i, arg)?;
                    group_size = v.parse().map_err(|_| invalid(arg, v))?;
                }
                "--boss" => {
                    config.start = Some(StartActivity::Boss {
                        boss_id: value(args, &mut i, arg)?.to_string(),
                    });
                }
                "--train" => {
                    let v = value(args, &mut i, arg)?;
                    config.start = Some(StartActivity::Train {
                        skill: SkillType::parse(v).ok_or_else(|| invalid(arg, v))?,
                    });
                }
                "--ticks" => {
                    let v = value(args, &mut i, arg)?;
                    config.max_ticks = Some(v.parse().map_err(|_| invalid(arg, v))?);
                }
                "--save-dir" => config.save_dir = Some(PathBuf::from(value(args, &mut i, arg)?)),
                other if other.starts_with('-') => {
                    return Err(ConfigError::UnknownArgument(other.to_string()))
                }
                other => {
                    if account.is_some() {
                        return Err(ConfigError::UnknownArgument(other.to_string()));
                    }
                    account = Some(other.to_string());
                }
            }
            i += 1;
        }

        if let Some(StartActivity::Hunt {
            group_size: size, ..
        }) = config.start.as_mut()
        {
            *size = group_size;
        }
        config.account = account.ok_or(ConfigError::MissingAccount)?;
        Ok(config)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

pub fn usage() -> &'static str {
    "idlehunt - headless idle hunting session\n\
     \n\
     Usage: idlehunt <account> [options]\n\
     \n\
     Options:\n\
     \x20 --new NAME        Character name when registering a new account\n\
     \x20 --vocation V      Choose a vocation (knight, paladin, sorcerer, druid)\n\
     \x20 --hunt ID         Start hunting a monster\n\
     \x20 --group N         Lure N monsters at once (with --hunt)\n\
     \x20 --boss ID         Challenge a boss\n\
     \x20 --train SKILL     Train a skill (sword, axe, club, distance, fist, defense, magic)\n\
     \x20 --ticks N         Stop after N ticks (default: until Ctrl+C)\n\
     \x20 --save-dir DIR    Directory for save files\n\
     \x20 -v, --verbose     More log output (repeatable)\n\
     \x20 -h, --help        Show this help message"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("idlehunt")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_args(&args("alice")).unwrap();
        assert_eq!(config.account, "alice");
        assert_eq!(config.tick_interval_ms, 666);
        assert_eq!(config.autosave_interval_seconds, 5);
        assert_eq!(config.start, None);
        assert_eq!(config.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_hunt_with_group() {
        let config = EngineConfig::from_args(&args("bob --group 3 --hunt wolf --ticks 100 -v")).unwrap();
        assert_eq!(
            config.start,
            Some(StartActivity::Hunt {
                monster_id: "wolf".to_string(),
                group_size: 3
            })
        );
        assert_eq!(config.max_ticks, Some(100));
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_training_and_vocation() {
        let config = EngineConfig::from_args(&args("carol --train club --vocation Knight --new Carol")).unwrap();
        assert_eq!(config.start, Some(StartActivity::Train { skill: SkillType::Club }));
        assert_eq!(config.vocation, Some(Vocation::Knight));
        assert_eq!(config.new_name.as_deref(), Some("Carol"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(EngineConfig::from_args(&args("")), Err(ConfigError::MissingAccount));
        assert_eq!(EngineConfig::from_args(&args("a --help")), Err(ConfigError::HelpRequested));
        assert_eq!(
            EngineConfig::from_args(&args("a --ticks")),
            Err(ConfigError::MissingValue("--ticks".to_string()))
        );
        assert_eq!(
            EngineConfig::from_args(&args("a --train cooking")),
            Err(ConfigError::InvalidValue {
                flag: "--train".to_string(),
                value: "cooking".to_string()
            })
        );
        assert_eq!(
            EngineConfig::from_args(&args("a --fly")),
            Err(ConfigError::UnknownArgument("--fly".to_string()))
        );
    }

    #[test]
    fn test_boss_maps_to_single_target_hunt() {
        let config = EngineConfig::from_args(&args("dave --boss munster")).unwrap();
        assert_eq!(
            config.start.unwrap().to_command(),
            Command::StartHunt {
                monster_id: "munster".to_string(),
                is_boss: true,
                group_size: 1
            }
        );
    }
}
