#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use discovery::Source;
    use key_listeners::{Activation, HoldKeyEvent, Key, SequenceEvent};

    use crate::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = load_from_str("()", None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.hints.characters, "sadfjklewcmpgh");
        assert_eq!(cfg.activation.hold_delay(), Duration::from_millis(250));
        assert_eq!(
            cfg.activation.sequence_timing().reset_delay,
            Duration::from_millis(250)
        );
        assert_eq!(cfg.discovery.sources, Source::ALL.to_vec());
        assert_eq!(
            cfg.discovery_options().extras_timeout,
            Duration::from_millis(50)
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let ron = r#"(
            activation: (
                scroll_mode: (enabled: false, keys: "jk"),
                hold_key: "tab",
                typing_guard_ms: 80,
            ),
            discovery: (sources: [active_window, menu_bar]),
        )"#;
        let cfg = load_from_str(ron, None).unwrap();
        assert_eq!(cfg.activation.hint_mode.keys, "fd");
        assert_eq!(cfg.activation.sequences(), vec![("fd", Activation::HintMode)]);
        assert_eq!(cfg.activation.hold_key(), Some(Key::Tab));
        assert_eq!(
            cfg.activation.sequence_timing().typing_guard,
            Duration::from_millis(80)
        );
        assert_eq!(
            cfg.discovery.sources,
            vec![Source::ActiveWindow, Source::MenuBar]
        );
    }

    #[test]
    fn router_follows_config() {
        let cfg = Config::default();
        let router = cfg.activation.router();
        assert_eq!(
            router.on_sequence(&SequenceEvent::MatchedSequence(vec!['j', 'k'])),
            Some(Activation::ScrollMode)
        );
        assert_eq!(
            router.on_hold(&HoldKeyEvent::HeldKey(Key::Space)),
            Some(Activation::HintMode)
        );

        let cfg = load_from_str("(activation: (hold_key: None))", None).unwrap();
        assert_eq!(cfg.activation.hold_key(), None);
        assert_eq!(
            cfg.activation
                .router()
                .on_hold(&HoldKeyEvent::HeldKey(Key::Space)),
            None
        );
    }

    #[test]
    fn unknown_field_fails_to_parse() {
        let err = load_from_str("(hints: (charcters: \"ab\"))", None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn validation_failures() {
        let cases = [
            r#"(hints: (characters: "aaAA"))"#,
            r#"(activation: (hint_mode: (keys: "")))"#,
            r#"(activation: (hint_mode: (keys: "j"), scroll_mode: (keys: "jk")))"#,
            r#"(activation: (hint_mode: (keys: "jk")))"#,
            r#"(activation: (hold_key: "hyper"))"#,
            r#"(activation: (hold_delay_ms: 0))"#,
            r#"(discovery: (extras_timeout_ms: 0))"#,
            r#"(discovery: (sources: []))"#,
        ];
        for ron in cases {
            let err = load_from_str(ron, None).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{ron}: {err:?}");
        }
        // Characters must upper-case to a single character.
        let err = load_from_str(r#"(hints: (characters: "asdß"))"#, None).unwrap_err();
        assert!(
            matches!(&err, Error::Validation { message, .. } if message.contains("hints.characters")),
            "{err:?}"
        );
        assert!(load_from_str(r#"(hints: (characters: "asdé"))"#, None).is_ok());
        // A disabled sequence may overlap.
        let ok = r#"(activation: (hint_mode: (keys: "j"), scroll_mode: (enabled: false, keys: "jk")))"#;
        assert!(load_from_str(ok, None).is_ok());
    }

    #[test]
    fn errors_carry_the_path() {
        let dir = std::env::temp_dir().join(format!("axhint-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ron");
        fs::write(&path, "(hints: (characters: \"a\"))").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.pretty().contains("Config validation error in"));

        let missing = dir.join("missing.ron");
        let err = load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn explicit_path_wins() {
        let p = std::path::Path::new("/nonexistent/axhint.ron");
        assert_eq!(resolve_config_path(Some(p)), Some(p.to_path_buf()));
        assert!(default_config_path().ends_with(".axhint/config.ron"));
    }
}
