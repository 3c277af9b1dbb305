// Eggrs Config Integration Tests
//
// Load pattern files, build a registry from them and drive it with key presses.
//
// Run with: cargo test -p eggrs-core --test config_test

mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use eggrs_core::{Config, KeyInput, MatchEvent, Metadata, Reaction};

    fn default_config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/default.toml")
    }

    #[test]
    fn default_config_file_matches_builtin() {
        let from_file = Config::from_toml_path(default_config_path())
            .expect("failed to parse default config");
        let builtin = Config::builtin().expect("failed to parse builtin config");

        assert_eq!(from_file.source_path, Some(default_config_path()));
        assert!(builtin.source_path.is_none());
        let names = |c: &Config| c.patterns.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&from_file), names(&builtin));
        assert_eq!(names(&builtin), vec!["konami", "jasmine", "jasmine-typed"]);
    }

    #[test]
    fn builtin_registry_reacts_to_each_pattern() {
        let config = Config::builtin().unwrap();
        let fired: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&fired);
        let mut registry = config
            .build_registry(|entry| -> Reaction<Metadata> {
                let sink = Rc::clone(&sink);
                let message = entry.reaction.message.clone().unwrap_or_default();
                Box::new(move |event: &MatchEvent<'_, Metadata>| {
                    sink.borrow_mut().push(format!("{}: {}", event.name, message));
                })
            })
            .unwrap();
        assert_eq!(registry.len(), 3);

        let mut now = 0;
        let mut press = |registry: &mut eggrs_core::Registry<Metadata>, codes: &[u16], step: u64| {
            for code in codes {
                now += step;
                registry.on_input(&KeyInput::at_millis(*code, now));
            }
        };

        // Konami, typed slowly
        press(&mut registry, &[38, 38, 40, 40, 37, 39, 37, 39, 66, 65], 1500);
        assert_eq!(*fired.borrow(), vec!["konami: >> 30 lives granted <<".to_string()]);

        // "jasmine" typed slowly only satisfies the cursor pattern
        fired.borrow_mut().clear();
        press(&mut registry, &[74, 65, 83, 77, 73, 78, 69], 1500);
        assert_eq!(*fired.borrow(), vec!["jasmine: I love you baby!".to_string()]);

        // Typed quickly after a pause, both jasmine patterns fire
        fired.borrow_mut().clear();
        press(&mut registry, &[74], 5000);
        press(&mut registry, &[65, 83, 77, 73, 78, 69], 100);
        assert_eq!(
            *fired.borrow(),
            vec![
                "jasmine: I love you baby!".to_string(),
                "jasmine-typed: Typed it in one go!".to_string()
            ]
        );
    }

    #[test]
    fn builtin_typed_pattern_refires_after_stray_key() {
        let config = Config::builtin().unwrap();
        let fired: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        let mut registry = config
            .build_registry(|_| Box::new(|_: &MatchEvent<'_, Metadata>| {}))
            .unwrap();
        registry.add_hook(move |event| {
            sink.borrow_mut()
                .push(format!("{}@{}", event.name, event.timestamp.as_millis()));
        });

        let jasmine = [74u16, 65, 83, 77, 73, 78, 69];
        for (i, code) in jasmine.iter().enumerate() {
            registry.on_input(&KeyInput::at_millis(*code, i as u64 * 100));
        }
        // Unrelated key 1500 ms after the match, then the word again right away
        registry.on_input(&KeyInput::at_millis(66, 2100));
        for (i, code) in jasmine.iter().enumerate() {
            registry.on_input(&KeyInput::at_millis(*code, 2200 + i as u64 * 100));
        }

        assert_eq!(
            *fired.borrow(),
            vec![
                "jasmine@600".to_string(),
                "jasmine-typed@600".to_string(),
                "jasmine@2800".to_string(),
                "jasmine-typed@2800".to_string(),
            ]
        );
    }

    #[test]
    fn hook_sees_metadata_from_config() {
        let config = Config::from_toml(
            r#"
            [[pattern]]
            name = "abc"
            keys = "a,b,c"
            [pattern.metadata]
            team = "eggs"
            level = "3"
            "#,
        )
        .unwrap();

        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut registry = config
            .build_registry(|_| Box::new(|_: &MatchEvent<'_, Metadata>| {}))
            .unwrap();
        registry.add_hook(move |event| {
            let pairs: Vec<String> = event
                .metadata
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            sink.borrow_mut().push(format!("{} {}", event.name, pairs.join(",")));
        });

        for (i, code) in [65u16, 66, 67].iter().enumerate() {
            registry.on_input(&KeyInput::at_millis(*code, i as u64));
        }
        // Metadata keeps its file order
        assert_eq!(*seen.borrow(), vec!["abc team=eggs,level=3".to_string()]);
    }
}
