use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
    pub chatter: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(flags, std::io::stderr().is_terminal()));
}

fn prefs_for(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    UiPrefs {
        progress: is_tty && !flags.quiet && flags.format != OutputFormat::Json,
        chatter: !flags.quiet,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        chatter: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
            base_url: None,
        }
    }

    #[test]
    fn spinners_only_on_a_terminal_in_text_mode() {
        assert!(prefs_for(&flags(OutputFormat::Text, false), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Text, false), false).progress);
        assert!(!prefs_for(&flags(OutputFormat::Json, false), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Text, true), true).progress);
    }

    #[test]
    fn quiet_silences_chatter() {
        assert!(!prefs_for(&flags(OutputFormat::Text, true), true).chatter);
        assert!(prefs_for(&flags(OutputFormat::Json, false), false).chatter);
    }
}
