//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use nars_core::{
    Engine, EngineEvent, IdSequence, NarsConfig, NarsError,
    formats::MAX_SNAPSHOT_SIZE, parse_sentence, parse_term, snapshot_from_bytes,
    snapshot_to_bytes,
};
use std::io::BufRead;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a Narsese script (10 MB).
const MAX_SCRIPT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum size of a TOML configuration file (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), NarsError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| NarsError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(NarsError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, NarsError> {
    let canonical = path.canonicalize().map_err(|e| {
        NarsError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(NarsError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a whole file after path and size checks.
fn read_checked(path: &Path, max_size: u64) -> Result<Vec<u8>, NarsError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, max_size)?;
    std::fs::read(&validated).map_err(|e| NarsError::IoError(format!("Read file: {}", e)))
}

// =============================================================================
// CONFIGURATION AND STATE
// =============================================================================

/// Load the engine configuration: defaults, then the TOML file, then `--seed`.
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<NarsConfig, NarsError> {
    let mut config = match path {
        Some(path) => {
            let bytes = read_checked(path, MAX_CONFIG_FILE_SIZE)?;
            let text = String::from_utf8(bytes)
                .map_err(|e| NarsError::InvalidConfig(format!("Config is not UTF-8: {}", e)))?;
            parse_config(&text)?
        }
        None => NarsConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// Parse TOML configuration text. Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<NarsConfig, NarsError> {
    toml::from_str(text).map_err(|e| NarsError::InvalidConfig(e.to_string()))
}

/// Build an engine, restoring the snapshot at `state` when the file exists.
pub fn build_engine(config: NarsConfig, state: Option<&Path>) -> Result<Engine, NarsError> {
    let mut engine = Engine::with_config(config)?;
    if let Some(path) = state.filter(|p| p.exists()) {
        let bytes = read_checked(path, MAX_SNAPSHOT_SIZE as u64)?;
        let snapshot = snapshot_from_bytes(&bytes)?;
        let count = engine.restore(&snapshot)?;
        tracing::info!(path = %path.display(), count, "state loaded");
    }
    Ok(engine)
}

/// Write the engine's beliefs and desires to `state`, if one was given.
///
/// Writes to a sibling temporary file first and renames it into place.
pub fn save_state(engine: &Engine, state: Option<&Path>) -> Result<(), NarsError> {
    let Some(path) = state else {
        return Ok(());
    };
    let snapshot = engine.snapshot();
    let bytes = snapshot_to_bytes(&snapshot)?;
    let temp = path.with_extension("tmp");
    std::fs::write(&temp, &bytes).map_err(|e| NarsError::IoError(format!("Write state: {}", e)))?;
    std::fs::rename(&temp, path).map_err(|e| NarsError::IoError(format!("Replace state: {}", e)))?;
    tracing::info!(path = %path.display(), count = snapshot.len(), "state saved");
    Ok(())
}

// =============================================================================
// SCRIPT LINES
// =============================================================================

/// One line of a script or shell session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine<'a> {
    /// Blank line or `//` comment.
    Skip,
    /// A bare integer: run that many cycles.
    Cycles(u64),
    /// Narsese input.
    Sentence(&'a str),
}

impl<'a> ScriptLine<'a> {
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Self::Skip;
        }
        match line.parse::<u64>() {
            Ok(cycles) => Self::Cycles(cycles),
            Err(_) => Self::Sentence(line),
        }
    }
}

/// Apply one script line to `engine`.
pub fn apply_line(engine: &mut Engine, line: &str) -> Result<(), NarsError> {
    match ScriptLine::parse(line) {
        ScriptLine::Skip => Ok(()),
        ScriptLine::Cycles(n) => {
            engine.run_cycles(n);
            Ok(())
        }
        ScriptLine::Sentence(text) => engine.submit(text).map(|_| ()),
    }
}

/// Print drained events, one per line.
fn print_events(events: &[EngineEvent], json_mode: bool) {
    for event in events {
        if json_mode {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Failed to encode event: {}", e),
            }
        } else {
            println!("{}", event);
        }
    }
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run a Narsese script, then `cycles` more cycles.
pub fn cmd_run(
    config: NarsConfig,
    state: Option<&Path>,
    json_mode: bool,
    file: &Path,
    cycles: u64,
) -> Result<(), NarsError> {
    tracing::info!("Running script {:?}", file);

    let bytes = read_checked(file, MAX_SCRIPT_FILE_SIZE)?;
    let script = String::from_utf8_lossy(&bytes);
    let mut engine = build_engine(config, state)?;

    for (number, line) in script.lines().enumerate() {
        apply_line(&mut engine, line).map_err(|e| match e {
            NarsError::Syntax(msg) => NarsError::Syntax(format!("line {}: {}", number + 1, msg)),
            other => other,
        })?;
        print_events(&engine.drain_events(), json_mode);
    }

    engine.run_cycles(cycles);
    print_events(&engine.drain_events(), json_mode);

    save_state(&engine, state)
}

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Read lines from stdin until EOF. Syntax errors are reported and skipped.
pub fn cmd_shell(config: NarsConfig, state: Option<&Path>, json_mode: bool) -> Result<(), NarsError> {
    let mut engine = build_engine(config, state)?;
    if !json_mode {
        println!("Narsese shell. Enter sentences, a number to run cycles, Ctrl+D to quit.");
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.map_err(|e| NarsError::IoError(format!("Read stdin: {}", e)))?;
        if let Err(e) = apply_line(&mut engine, &line) {
            eprintln!("{}", e);
        }
        print_events(&engine.drain_events(), json_mode);
    }

    save_state(&engine, state)
}

// =============================================================================
// PARSE COMMAND
// =============================================================================

/// Parse `text` as a sentence, or failing that as a term.
pub fn cmd_parse(text: &str, json_mode: bool) -> Result<(), NarsError> {
    let mut ids = IdSequence::new();
    let (kind, canonical, complexity) = match parse_sentence(text, &mut ids, 0) {
        Ok(sentence) => (
            "sentence",
            sentence.render_at(0),
            sentence.statement().complexity(),
        ),
        Err(_) => {
            let term = parse_term(text)?;
            ("term", term.to_string(), term.complexity())
        }
    };

    if json_mode {
        let output = serde_json::json!({
            "kind": kind,
            "canonical": canonical,
            "complexity": complexity,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("{}: {}", kind, canonical);
        println!("complexity: {}", complexity);
    }
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server; save state after shutdown.
pub async fn cmd_server(
    config: NarsConfig,
    state: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<(), NarsError> {
    let engine = build_engine(config, state)?;

    println!("NARS Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:  {}", host);
    println!("  Port:  {}", port);
    if let Some(path) = state {
        println!("  State: {:?}", path);
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /health   - Health check");
    println!("  GET  /status   - Engine status");
    println!("  POST /input    - Submit Narsese sentences");
    println!("  POST /step     - Run reasoning cycles");
    println!("  GET  /outputs  - Drain answers and executed operations");
    println!("  POST /concept  - Inspect a concept");
    println!("  GET  /snapshot - Stored beliefs and desires");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let app_state = AppState::new(engine);
    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, app_state.clone()).await?;

    let engine = app_state.engine.read().await;
    save_state(&engine, state)
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show engine status.
pub fn cmd_status(config: NarsConfig, state: Option<&Path>, json_mode: bool) -> Result<(), NarsError> {
    let engine = build_engine(config, state)?;

    if json_mode {
        let output = serde_json::json!({
            "state": state.map(|p| p.to_string_lossy()),
            "cycle": engine.cycle(),
            "concepts": engine.memory().len(),
            "buffered": engine.buffered(),
            "pending_operations": engine.pending_operations(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("NARS Engine Status");
    println!("==================");
    if let Some(path) = state {
        println!("State: {:?}", path);
        println!();
    }
    println!("Cycle:              {}", engine.cycle());
    println!("Concepts:           {}", engine.memory().len());
    println!("Buffered tasks:     {}", engine.buffered());
    println!("Pending operations: {}", engine.pending_operations());

    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration as TOML.
pub fn cmd_config(config: &NarsConfig) -> Result<(), NarsError> {
    let text = toml::to_string_pretty(config)
        .map_err(|e| NarsError::SerializationError(format!("Encode config: {}", e)))?;
    print!("{}", text);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_config(NarsConfig {
            consider_per_cycle: 0,
            ..NarsConfig::seeded(3)
        })
        .expect("engine")
    }

    #[test]
    fn script_line_grammar() {
        assert_eq!(ScriptLine::parse(""), ScriptLine::Skip);
        assert_eq!(ScriptLine::parse("  // note"), ScriptLine::Skip);
        assert_eq!(ScriptLine::parse(" 12 "), ScriptLine::Cycles(12));
        assert_eq!(
            ScriptLine::parse("(a --> b)."),
            ScriptLine::Sentence("(a --> b).")
        );
    }

    #[test]
    fn apply_line_submits_and_steps() {
        let mut engine = engine();
        apply_line(&mut engine, "(a --> b).").expect("submit");
        assert_eq!(engine.buffered(), 1);
        apply_line(&mut engine, "2").expect("cycles");
        assert_eq!(engine.cycle(), 2);
        assert!(apply_line(&mut engine, "a --> b").is_err());
    }

    #[test]
    fn config_toml_partial_fields() {
        let config = parse_config("table_capacity = 9\nseed = 4\n").expect("config");
        assert_eq!(config.table_capacity, 9);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.k, NarsConfig::default().k);
        assert!(parse_config("table_capacity = \"many\"").is_err());
    }

    #[test]
    fn config_renders_and_parses_back() {
        let config = NarsConfig::seeded(11);
        let text = toml::to_string_pretty(&config).expect("encode");
        assert_eq!(parse_config(&text).expect("decode"), config);
    }

    #[test]
    fn state_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nars.state");

        let mut engine = engine();
        engine.submit("(cat --> animal). %0.8;0.7%").expect("submit");
        engine.step();
        save_state(&engine, Some(&path)).expect("save");

        let restored = build_engine(NarsConfig::seeded(3), Some(&path)).expect("load");
        assert_eq!(restored.cycle(), engine.cycle());
        let term = parse_term("(cat --> animal)").expect("term");
        let belief = restored.best_belief(&term).expect("belief");
        let value = belief.value().expect("value");
        assert!((value.frequency() - 0.8).abs() < 1e-9);
        assert!((value.confidence() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn missing_state_file_starts_fresh() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.state");
        let engine = build_engine(NarsConfig::seeded(3), Some(&path)).expect("engine");
        assert_eq!(engine.cycle(), 0);
        assert!(engine.memory().is_empty());
    }

    #[test]
    fn corrupt_state_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.state");
        std::fs::write(&path, b"not a snapshot").expect("write");
        assert!(build_engine(NarsConfig::seeded(3), Some(&path)).is_err());
    }
}
