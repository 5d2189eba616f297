//! Runtime configuration for the terminal runner.
//!
//! Environment variables provide defaults; command-line flags override them.
//!
//! | variable          | flag         | default            |
//! |-------------------|--------------|--------------------|
//! | `TETRIS_SEED`     | `--seed`     | derived from clock |
//! | `TETRIS_FRAME_MS` | `--frame-ms` | 16                 |
//! | `TETRIS_LOG_PATH` | `--log`      | none (no log)      |

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the piece generator.
    pub seed: u32,
    /// Wall-clock length of one simulation frame.
    pub frame_ms: u32,
    /// JSON-lines event log destination.
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = lookup("TETRIS_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(FRAME_MS);

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            frame_ms,
            log_path,
        }
    }

    /// Apply command-line flags (program name already stripped).
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = v
                        .parse()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--frame-ms" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --frame-ms"))?;
                    self.frame_ms = match v.parse::<u32>() {
                        Ok(ms) if ms > 0 => ms,
                        _ => return Err(anyhow!("invalid --frame-ms value: {}", v)),
                    };
                }
                "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(v.clone());
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lookup_reads_all_variables() {
        let cfg = GameConfig::from_lookup(|key| match key {
            "TETRIS_SEED" => Some("42".to_string()),
            "TETRIS_FRAME_MS" => Some(" 20 ".to_string()),
            "TETRIS_LOG_PATH" => Some("/tmp/tetris.jsonl".to_string()),
            _ => None,
        });
        assert_eq!(
            cfg,
            GameConfig {
                seed: 42,
                frame_ms: 20,
                log_path: Some("/tmp/tetris.jsonl".to_string()),
            }
        );
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let cfg = GameConfig::from_lookup(|key| match key {
            "TETRIS_FRAME_MS" => Some("0".to_string()),
            "TETRIS_LOG_PATH" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.frame_ms, FRAME_MS);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn flags_override_environment() {
        let mut cfg = GameConfig::from_lookup(|_| None);
        cfg.apply_args(&args(&["--seed", "7", "--frame-ms", "33", "--log", "out.jsonl"]))
            .unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.frame_ms, 33);
        assert_eq!(cfg.log_path.as_deref(), Some("out.jsonl"));
    }

    #[test]
    fn flag_errors() {
        let mut cfg = GameConfig::from_lookup(|_| None);
        assert!(cfg.apply_args(&args(&["--seed"])).is_err());
        assert!(cfg.apply_args(&args(&["--seed", "abc"])).is_err());
        assert!(cfg.apply_args(&args(&["--frame-ms", "0"])).is_err());
        let err = cfg.apply_args(&args(&["--fast"])).unwrap_err();
        assert!(err.to_string().contains("--fast"));
    }
}
