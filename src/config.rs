//! Runtime configuration: environment variables, then command-line overrides.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{Palette, DEFAULT_COLORS, DEFAULT_COLS, DEFAULT_ROWS, MAX_BOARD_DIM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub colors: u8,
    pub seed: u32,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            colors: DEFAULT_COLORS,
            seed: clock_seed(),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from `DOTS_*` environment variables. Unusable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let num = |key: &str| get(key).and_then(|s| s.trim().parse::<u32>().ok());

        let rows = num("DOTS_ROWS")
            .and_then(|v| u16::try_from(v).ok())
            .filter(|&v| ResizeRequest::validate(v, DEFAULT_COLS).is_ok())
            .unwrap_or(defaults.rows);
        let cols = num("DOTS_COLS")
            .and_then(|v| u16::try_from(v).ok())
            .filter(|&v| ResizeRequest::validate(DEFAULT_ROWS, v).is_ok())
            .unwrap_or(defaults.cols);
        let colors = num("DOTS_COLORS")
            .map(clamp_colors)
            .unwrap_or(defaults.colors);
        let seed = num("DOTS_SEED").unwrap_or(defaults.seed);
        let log_path = get("DOTS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            rows,
            cols,
            colors,
            seed,
            log_path,
        }
    }

    /// Apply `--rows/--cols/--colors/--seed/--log` overrides (program name already stripped).
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag {
                "--rows" => {
                    self.rows = parse_dim(flag, value()?)?;
                }
                "--cols" => {
                    self.cols = parse_dim(flag, value()?)?;
                }
                "--colors" => {
                    let v = value()?;
                    let n = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))?;
                    self.colors = clamp_colors(n);
                }
                "--seed" => {
                    let v = value()?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))?;
                }
                "--log" => {
                    self.log_path = Some(value()?.clone());
                }
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 2;
        }
        Ok(self)
    }

    /// Environment first, then `args` on top.
    pub fn load(args: &[String]) -> Result<Self> {
        Self::from_env().apply_args(args)
    }
}

/// A board size asked for at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    pub rows: u16,
    pub cols: u16,
}

impl ResizeRequest {
    /// Accept sizes in `1..=MAX_BOARD_DIM` on both axes; otherwise say why not.
    pub fn validate(rows: u16, cols: u16) -> Result<Self, &'static str> {
        if rows == 0 || cols == 0 {
            return Err("board needs at least one row and one column");
        }
        if rows > MAX_BOARD_DIM || cols > MAX_BOARD_DIM {
            return Err("board is limited to 8x8");
        }
        Ok(Self { rows, cols })
    }

    /// Current size nudged by `(d_rows, d_cols)`, then validated.
    pub fn nudge(rows: u16, cols: u16, delta: (i32, i32)) -> Result<Self, &'static str> {
        let r = rows as i32 + delta.0;
        let c = cols as i32 + delta.1;
        if r < 0 || c < 0 {
            return Err("board needs at least one row and one column");
        }
        Self::validate(r.min(u16::MAX as i32) as u16, c.min(u16::MAX as i32) as u16)
    }
}

fn parse_dim(flag: &str, v: &str) -> Result<u16> {
    let n = v
        .parse::<u16>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))?;
    if n == 0 || n > MAX_BOARD_DIM {
        return Err(anyhow!("{} must be between 1 and {}", flag, MAX_BOARD_DIM));
    }
    Ok(n)
}

fn clamp_colors(n: u32) -> u8 {
    let max = Palette::default().len() as u32;
    n.clamp(1, max) as u8
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = GameConfig::from_lookup(|_| None);
        assert_eq!((cfg.rows, cfg.cols, cfg.colors), (6, 6, 4));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn environment_values_are_read() {
        let cfg = GameConfig::from_lookup(env(&[
            ("DOTS_ROWS", "4"),
            ("DOTS_COLS", " 5 "),
            ("DOTS_COLORS", "3"),
            ("DOTS_SEED", "42"),
            ("DOTS_LOG_PATH", "/tmp/dots.jsonl"),
        ]));
        assert_eq!(
            cfg,
            GameConfig {
                rows: 4,
                cols: 5,
                colors: 3,
                seed: 42,
                log_path: Some("/tmp/dots.jsonl".to_string()),
            }
        );
    }

    #[test]
    fn bad_environment_values_fall_back() {
        let cfg = GameConfig::from_lookup(env(&[
            ("DOTS_ROWS", "nine"),
            ("DOTS_COLS", "40"),
            ("DOTS_COLORS", "99"),
            ("DOTS_LOG_PATH", "   "),
        ]));
        assert_eq!((cfg.rows, cfg.cols, cfg.colors), (6, 6, 6));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn args_override_environment() {
        let base = GameConfig::from_lookup(env(&[("DOTS_ROWS", "4")]));
        let cfg = base
            .apply_args(&args(&["--rows", "7", "--cols", "3", "--seed", "9", "--log", "x.log"]))
            .unwrap();
        assert_eq!((cfg.rows, cfg.cols, cfg.seed), (7, 3, 9));
        assert_eq!(cfg.log_path.as_deref(), Some("x.log"));
    }

    #[test]
    fn bad_args_are_errors() {
        let base = GameConfig::from_lookup(|_| None);
        assert!(base.clone().apply_args(&args(&["--rows"])).is_err());
        assert!(base.clone().apply_args(&args(&["--rows", "0"])).is_err());
        assert!(base.clone().apply_args(&args(&["--cols", "9"])).is_err());
        assert!(base.clone().apply_args(&args(&["--seed", "-1"])).is_err());
        let err = base.apply_args(&args(&["--fast"])).unwrap_err();
        assert!(err.to_string().contains("--fast"));
    }

    #[test]
    fn color_count_is_clamped_to_palette() {
        let base = GameConfig::from_lookup(|_| None);
        let cfg = base.clone().apply_args(&args(&["--colors", "0"])).unwrap();
        assert_eq!(cfg.colors, 1);
        let cfg = base.apply_args(&args(&["--colors", "12"])).unwrap();
        assert_eq!(cfg.colors, 6);
    }

    #[test]
    fn resize_policy() {
        assert_eq!(
            ResizeRequest::validate(8, 1),
            Ok(ResizeRequest { rows: 8, cols: 1 })
        );
        assert!(ResizeRequest::validate(0, 4).is_err());
        assert!(ResizeRequest::validate(4, 9).is_err());
        assert_eq!(
            ResizeRequest::nudge(6, 6, (1, 0)),
            Ok(ResizeRequest { rows: 7, cols: 6 })
        );
        assert!(ResizeRequest::nudge(8, 6, (1, 0)).is_err());
        assert!(ResizeRequest::nudge(1, 6, (-1, 0)).is_err());
    }
}
