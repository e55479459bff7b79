//! Semantic checks run after parsing.

use hint_mode::normalize_alphabet;
use key_listeners::Key;

use crate::types::Config;

/// Check `cfg`, returning a message for the first problem found.
pub(crate) fn validate(cfg: &Config) -> Result<(), String> {
    let unique = normalize_alphabet(&cfg.hints.characters)
        .map_err(|e| format!("hints.characters: {e}"))?
        .len();
    if unique < 2 {
        return Err(format!(
            "hints.characters needs at least 2 unique characters, got {unique}"
        ));
    }

    let sequences = cfg.activation.sequences();
    for (keys, activation) in &sequences {
        if keys.is_empty() {
            return Err(format!("activation: the {activation} sequence is empty"));
        }
    }
    for (i, (a, _)) in sequences.iter().enumerate() {
        for (b, _) in &sequences[i + 1..] {
            if a.starts_with(b) || b.starts_with(a) {
                return Err(format!(
                    "activation: sequences {a:?} and {b:?} overlap; neither may be a prefix of the other"
                ));
            }
        }
    }

    if let Some(name) = &cfg.activation.hold_key {
        Key::from_spec(name).map_err(|e| format!("activation.hold_key: {e}"))?;
    }

    let delays = [
        ("activation.hold_delay_ms", cfg.activation.hold_delay_ms),
        ("activation.sequence_reset_ms", cfg.activation.sequence_reset_ms),
        ("discovery.extras_timeout_ms", cfg.discovery.extras_timeout_ms),
    ];
    for (name, value) in delays {
        if value == 0 {
            return Err(format!("{name} must be greater than zero"));
        }
    }

    if cfg.discovery.sources.is_empty() {
        return Err("discovery.sources must name at least one source".to_string());
    }
    Ok(())
}
