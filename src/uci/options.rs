//! UCI option table: the `option ...` lines advertised in response to
//! `uci`, and `setoption` parsing against `EngineConfig`.

use std::time::Duration;

use crate::config::{EngineConfig, MAX_HASH_MB, MAX_THREADS, MIN_HASH_MB};

/// One line of `option name <N> type <T> ...` as emitted in response to
/// `uci`.
#[must_use]
pub fn option_lines() -> Vec<String> {
    vec![
        format!("option name Hash type spin default 16 min {MIN_HASH_MB} max {MAX_HASH_MB}"),
        format!("option name Threads type spin default 1 min 1 max {MAX_THREADS}"),
        "option name Ponder type check default false".to_string(),
        "option name MultiPV type spin default 1 min 1 max 256".to_string(),
        "option name SyzygyPath type string default <empty>".to_string(),
        "option name Contempt type spin default 0 min -100 max 100".to_string(),
        "option name Move Overhead type spin default 30 min 0 max 5000".to_string(),
    ]
}

/// The result of applying a `setoption` command: most options take effect
/// immediately on `EngineConfig`; `Hash` and `Threads` additionally require
/// the caller to rebuild the search `Engine` (returned as flags so the UCI
/// loop can do that without this module depending on `search::Engine`).
#[derive(Default)]
pub struct ApplyResult {
    pub hash_changed: bool,
    pub threads_changed: bool,
}

/// Apply `setoption name <name...> value <value...>` against `config`.
/// Unknown option names are ignored per the protocol-error policy: no
/// abort, optional diagnostic logged by the caller.
pub fn apply_setoption(config: &mut EngineConfig, parts: &[&str]) -> Result<ApplyResult, String> {
    let value_pos = parts.iter().position(|&p| p.eq_ignore_ascii_case("value"));
    let name_start = parts.iter().position(|&p| p.eq_ignore_ascii_case("name")).map_or(1, |i| i + 1);
    let name_end = value_pos.unwrap_or(parts.len());
    if name_start >= name_end {
        return Err("setoption missing a name".to_string());
    }
    let name = parts[name_start..name_end].join(" ");
    let value = value_pos.map(|i| parts[i + 1..].join(" ")).unwrap_or_default();

    let mut result = ApplyResult::default();
    match name.as_str() {
        "Hash" => {
            let mb: usize = value.parse().map_err(|_| format!("invalid Hash value '{value}'"))?;
            config.set_hash_mb(mb);
            result.hash_changed = true;
        }
        "Threads" => {
            let n: usize = value.parse().map_err(|_| format!("invalid Threads value '{value}'"))?;
            config.set_threads(n);
            result.threads_changed = true;
        }
        "Ponder" => {
            config.ponder = value.eq_ignore_ascii_case("true");
        }
        "MultiPV" => {
            let n: u32 = value.parse().map_err(|_| format!("invalid MultiPV value '{value}'"))?;
            config.multi_pv = n.max(1);
        }
        "SyzygyPath" => {
            config.syzygy_path = if value.is_empty() || value == "<empty>" { None } else { Some(value) };
        }
        "Contempt" => {
            let cp: i32 = value.parse().map_err(|_| format!("invalid Contempt value '{value}'"))?;
            config.set_contempt(cp);
        }
        "Move Overhead" => {
            let ms: u64 = value.parse().map_err(|_| format!("invalid Move Overhead value '{value}'"))?;
            config.move_overhead = Duration::from_millis(ms);
        }
        other => return Err(format!("unrecognized option '{other}'")),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_option_updates_config_and_reports_change() {
        let mut config = EngineConfig::default();
        let parts: Vec<&str> = "name Hash value 256".split_whitespace().collect();
        let result = apply_setoption(&mut config, &parts).unwrap();
        assert_eq!(config.hash_mb, 256);
        assert!(result.hash_changed);
        assert!(!result.threads_changed);
    }

    #[test]
    fn multi_word_option_name_is_joined() {
        let mut config = EngineConfig::default();
        let parts: Vec<&str> = "name Move Overhead value 100".split_whitespace().collect();
        apply_setoption(&mut config, &parts).unwrap();
        assert_eq!(config.move_overhead, Duration::from_millis(100));
    }

    #[test]
    fn unknown_option_is_a_recoverable_error() {
        let mut config = EngineConfig::default();
        let parts: Vec<&str> = "name NotARealOption value 1".split_whitespace().collect();
        assert!(apply_setoption(&mut config, &parts).is_err());
    }

    #[test]
    fn syzygy_path_accepts_a_string_value() {
        let mut config = EngineConfig::default();
        let parts: Vec<&str> = "name SyzygyPath value /opt/tables".split_whitespace().collect();
        apply_setoption(&mut config, &parts).unwrap();
        assert_eq!(config.syzygy_path.as_deref(), Some("/opt/tables"));
    }
}
