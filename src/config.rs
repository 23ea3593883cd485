use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use unsegen::input::Key;

use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "MCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("mcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".mcal.toml"));
    }

    locations
}

/// Loads the configuration from `path` if given, otherwise from the first
/// existing default location. Falls back to defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::new(
                ErrorKind::ConfigMissing,
                &path.display().to_string(),
            ));
        }
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.exists())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnimationSpec {
    duration_ms: Option<u64>,
    frame_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeSpec {
    today_char: Option<char>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigSpec {
    tick_rate_ms: Option<u64>,
    animation: AnimationSpec,
    theme: ThemeSpec,
    keys: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    /// Interval of clock refreshes while nothing moves.
    pub tick_rate: Duration,
    /// Interval between animation frames.
    pub frame_interval: Duration,
    pub animation_duration: Duration,
    pub today_char: Option<char>,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            tick_rate: Duration::from_millis(500),
            frame_interval: Duration::from_millis(16),
            animation_duration: Duration::from_millis(300),
            today_char: Some('*'),
        };

        config.key_map.insert(Key::Char('l'), Cmd::NextMonth);
        config.key_map.insert(Key::Char('n'), Cmd::NextMonth);
        config.key_map.insert(Key::Right, Cmd::NextMonth);
        config.key_map.insert(Key::Char('h'), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('p'), Cmd::PrevMonth);
        config.key_map.insert(Key::Left, Cmd::PrevMonth);
        config.key_map.insert(Key::Char('t'), Cmd::Today);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);

        config
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Loading configuration from '{}'", path.display());
        let content = fs::read_to_string(path)?;
        content.parse().map_err(|e: Error| {
            let msg = format!(
                "{} (in '{}')",
                e.message.as_deref().unwrap_or_default(),
                path.display()
            );
            e.with_msg(&msg)
        })
    }

    pub fn command_for(&self, key: &Key) -> Option<Cmd> {
        self.key_map.get(key).copied()
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        let spec: ConfigSpec = toml::from_str(s)?;
        let mut config = Config::default();

        if let Some(ms) = spec.tick_rate_ms {
            config.tick_rate = Duration::from_millis(ms);
        }
        if let Some(ms) = spec.animation.duration_ms {
            config.animation_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = spec.animation.frame_ms {
            config.frame_interval = Duration::from_millis(ms.max(1));
        }
        if spec.theme.today_char.is_some() {
            config.today_char = spec.theme.today_char;
        }

        for (key, cmd) in spec.keys.iter() {
            config.key_map.insert(parse_key(key)?, cmd.parse()?);
        }

        Ok(config)
    }
}

/// Parses key names like `q`, `Left`, `Space` or `C-n`.
pub fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    let key = match name {
        "Left" => Key::Left,
        "Right" => Key::Right,
        "Up" => Key::Up,
        "Down" => Key::Down,
        "Home" => Key::Home,
        "End" => Key::End,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Backspace" => Key::Backspace,
        "Esc" => Key::Esc,
        "Enter" => Key::Char('\n'),
        "Space" => Key::Char(' '),
        "Tab" => Key::Char('\t'),
        _ => match name.strip_prefix("C-").map(|rest| rest.chars().collect::<Vec<_>>()) {
            Some(rest) if rest.len() == 1 => Key::Ctrl(rest[0]),
            _ => match name.strip_prefix("A-").map(|rest| rest.chars().collect::<Vec<_>>()) {
                Some(rest) if rest.len() == 1 => Key::Alt(rest[0]),
                _ => {
                    return Err(Error::new(
                        ErrorKind::ConfigParse,
                        &format!("unknown key '{}'", name),
                    ))
                }
            },
        },
    };

    Ok(key)
}
