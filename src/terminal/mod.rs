mod display;
mod keys;

use std::io;
use std::time::Instant;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use eggrs_core::{Config, KeyInput, MatchEvent, Metadata, Reaction, Registry};

pub use display::{render, Banner, BannerState};
pub use keys::{to_key_code, UNKNOWN};

/// Restores cooked mode when dropped, including on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        println!();
    }
}

/// Build the registry for `config`, reacting on `banner`
pub fn build_registry(config: &Config, banner: &Banner) -> anyhow::Result<Registry<Metadata>> {
    let mut registry = config
        .build_registry(|entry| -> Reaction<Metadata> {
            let banner = banner.clone();
            let reaction = entry.reaction.clone();
            Box::new(move |_: &MatchEvent<'_, Metadata>| banner.react(&reaction))
        })
        .context("invalid pattern configuration")?;

    registry.add_hook(|event| {
        log::info!(
            "Hook called for: {} {} {:?}",
            event.name,
            event.sequence,
            event.metadata
        );
    });

    Ok(registry)
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, TermKey::Char('c') | TermKey::Char('d'))
}

/// Read key presses until Ctrl-C / Ctrl-D, feeding them to every pattern
pub fn run(config: &Config) -> anyhow::Result<()> {
    let banner = Banner::new();
    let mut registry = build_registry(config, &banner)?;

    let _guard = RawModeGuard::enable().context("failed to enable raw mode")?;
    banner.redraw();

    let start = Instant::now();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            break;
        }

        let input = KeyInput::new(to_key_code(key.code), start.elapsed());
        log::trace!("{:?} -> {} at {:?}", key.code, input.code, input.timestamp);
        registry.on_input(&input);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(TermKey::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit(&KeyEvent::new(TermKey::Char('d'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(TermKey::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(TermKey::Esc, KeyModifiers::NONE)));
    }

    #[test]
    fn test_builtin_registry_drives_banner() {
        let config = Config::builtin().unwrap();
        let banner = Banner::new();
        let mut registry = build_registry(&config, &banner).unwrap();

        let keys = [
            TermKey::Up,
            TermKey::Up,
            TermKey::Down,
            TermKey::Down,
            TermKey::Left,
            TermKey::Right,
            TermKey::Left,
            TermKey::Right,
            TermKey::Char('b'),
            TermKey::Char('A'),
        ];
        let fired: usize = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let code = to_key_code(*key).code();
                registry.on_input(&KeyInput::at_millis(code, i as u64 * 100))
            })
            .sum();

        assert_eq!(fired, 1);
        assert_eq!(banner.state().message.as_deref(), Some(">> 30 lives granted <<"));
    }
}
