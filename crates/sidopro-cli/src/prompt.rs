//! Terminal host for draft-guarded navigation.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use sidopro_core::ui::{
    draft::{EventOutcome, UnsavedNavigation, UNSAVED_NAVIGATION_EVENT},
    NavigationHost, TransitionContext, TransitionPhase,
};

/// Confirms on stdin; a terminal has no in-page listeners to veto.
pub struct TerminalHost {
    assume_yes: bool,
    transition: TransitionContext,
    navigated: bool,
}

impl TerminalHost {
    pub fn new(route: impl Into<String>, assume_yes: bool) -> Self {
        Self {
            assume_yes,
            transition: TransitionContext::new(route),
            navigated: false,
        }
    }

    /// Route reached by the last navigation, if any.
    pub fn destination(&self) -> Option<&str> {
        self.navigated.then(|| self.transition.route())
    }
}

/// Reads one answer line; only `y`/`yes` confirm.
fn read_answer<R: BufRead>(input: &mut R) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

impl NavigationHost for TerminalHost {
    fn dispatch(&mut self, event: &UnsavedNavigation) -> EventOutcome {
        debug!("{UNSAVED_NAVIGATION_EVENT} href={}", event.href);
        EventOutcome::Continue
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        read_answer(&mut io::stdin().lock())
    }

    fn navigate(&mut self, href: &str) {
        info!("Navigating to {href}");
        if self.transition.navigate(href) {
            while self.transition.advance() != TransitionPhase::Idle {
                debug!("Transition to {href}: {:?}", self.transition.phase());
            }
        }
        self.navigated = true;
    }
}
