use crate::args::RunArgs;
use crate::consts;
use crate::grid::Resolution;
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about gameplay
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path, or `None` if the local
    /// configuration directory could not be determined
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_local_dir().map(|p| p.join(consts::APP_DIR_NAME).join("config.toml"))
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Load the file named on the command line, which must exist, or else the
    /// file at the default path, which need not
    pub(crate) fn load_for(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(p) => Config::load(p, false),
            None => match Config::default_path() {
                Some(p) => Config::load(&p, true),
                None => Ok(Config::default()),
            },
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Screen resolution from which the grid size is derived
    pub(crate) resolution: Option<Resolution>,

    /// Milliseconds between movements of the snake
    pub(crate) tick_millis: Option<NonZeroU64>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which final scores are recorded
    pub(crate) scores_file: Option<PathBuf>,

    /// Whether to keep the scores recorded by earlier runs instead of
    /// starting each run with an empty leaderboard
    pub(crate) keep_scores: bool,
}

/// The settings in effect for a run, after combining the command line, the
/// configuration file, and the built-in defaults
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) resolution: Resolution,
    pub(crate) tick_period: Duration,
    pub(crate) scores_file: PathBuf,
    pub(crate) keep_scores: bool,
}

impl Settings {
    /// Command-line values take precedence over configuration values, which
    /// take precedence over the defaults.
    pub(crate) fn resolve(args: &RunArgs, config: Config) -> Result<Settings, ConfigError> {
        let resolution = args
            .resolution
            .or(config.game.resolution)
            .unwrap_or(consts::DEFAULT_RESOLUTION);
        let tick_period = args
            .tick_millis
            .or(config.game.tick_millis)
            .map_or(consts::TICK_PERIOD, |ms| Duration::from_millis(ms.get()));
        let scores_file = match args.scores_file.clone().or(config.files.scores_file) {
            Some(p) => p,
            None => default_scores_file().ok_or(ConfigError::NoScoresPath)?,
        };
        Ok(Settings {
            resolution,
            tick_period,
            scores_file,
            keep_scores: args.keep_scores || config.files.keep_scores,
        })
    }
}

fn default_scores_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(consts::APP_DIR_NAME).join(consts::SCORES_FILE_NAME))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local data directory; use --scores-file")]
    NoScoresPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parse_full() {
        let config = toml::from_str::<Config>(concat!(
            "[game]\n",
            "resolution = \"800x600\"\n",
            "tick-millis = 150\n",
            "\n",
            "[files]\n",
            "scores-file = \"/var/games/scores.txt\"\n",
            "keep-scores = true\n",
        ))
        .unwrap();
        assert_eq!(
            config,
            Config {
                game: GameConfig {
                    resolution: Some(Resolution {
                        width: 800,
                        height: 600
                    }),
                    tick_millis: NonZeroU64::new(150),
                },
                files: FileConfig {
                    scores_file: Some(PathBuf::from("/var/games/scores.txt")),
                    keep_scores: true,
                },
            }
        );
    }

    #[test]
    fn parse_empty() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_partial() {
        let config = toml::from_str::<Config>("[files]\nkeep-scores = true\n").unwrap();
        assert_eq!(config.game, GameConfig::default());
        assert_eq!(config.files.scores_file, None);
        assert!(config.files.keep_scores);
    }

    #[test]
    fn parse_bad_resolution() {
        let r = toml::from_str::<Config>("[game]\nresolution = \"800by600\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn parse_zero_tick() {
        let r = toml::from_str::<Config>("[game]\ntick-millis = 0\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing_allowed() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml"), true).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let dir = tempdir().unwrap();
        let r = Config::load(&dir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_explicit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[game]\nresolution = \"400x300\"\n").unwrap();
        let config = Config::load_for(Some(&path)).unwrap();
        assert_eq!(
            config.game.resolution,
            Some(Resolution {
                width: 400,
                height: 300
            })
        );
    }

    #[test]
    fn load_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[game\n").unwrap();
        let r = Config::load(&path, true);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn resolve_defaults() {
        let args = RunArgs {
            scores_file: Some(PathBuf::from("scores.txt")),
            ..RunArgs::default()
        };
        let settings = Settings::resolve(&args, Config::default()).unwrap();
        assert_eq!(
            settings,
            Settings {
                resolution: consts::DEFAULT_RESOLUTION,
                tick_period: consts::TICK_PERIOD,
                scores_file: PathBuf::from("scores.txt"),
                keep_scores: false,
            }
        );
    }

    #[test]
    fn resolve_config_over_defaults() {
        let config = Config {
            game: GameConfig {
                resolution: Some(Resolution {
                    width: 800,
                    height: 600,
                }),
                tick_millis: NonZeroU64::new(250),
            },
            files: FileConfig {
                scores_file: Some(PathBuf::from("config-scores.txt")),
                keep_scores: true,
            },
        };
        let settings = Settings::resolve(&RunArgs::default(), config).unwrap();
        assert_eq!(
            settings,
            Settings {
                resolution: Resolution {
                    width: 800,
                    height: 600
                },
                tick_period: Duration::from_millis(250),
                scores_file: PathBuf::from("config-scores.txt"),
                keep_scores: true,
            }
        );
    }

    #[test]
    fn resolve_args_over_config() {
        let args = RunArgs {
            resolution: Some(Resolution {
                width: 1024,
                height: 768,
            }),
            tick_millis: NonZeroU64::new(50),
            scores_file: Some(PathBuf::from("cli-scores.txt")),
            keep_scores: true,
            ..RunArgs::default()
        };
        let config = Config {
            game: GameConfig {
                resolution: Some(Resolution {
                    width: 800,
                    height: 600,
                }),
                tick_millis: NonZeroU64::new(250),
            },
            files: FileConfig {
                scores_file: Some(PathBuf::from("config-scores.txt")),
                keep_scores: false,
            },
        };
        let settings = Settings::resolve(&args, config).unwrap();
        assert_eq!(
            settings,
            Settings {
                resolution: Resolution {
                    width: 1024,
                    height: 768
                },
                tick_period: Duration::from_millis(50),
                scores_file: PathBuf::from("cli-scores.txt"),
                keep_scores: true,
            }
        );
    }
}
