//! Breakpoints and the activation signal the server materializer drives.

use log::debug;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPoint {
    pub alias: String,
    pub media_query: String,
    pub priority: i32,
}

impl BreakPoint {
    pub fn new(alias: &str, media_query: &str, priority: i32) -> Self {
        BreakPoint {
            alias: alias.to_string(),
            media_query: media_query.to_string(),
            priority,
        }
    }
}

/// The standard responsive set, narrowest first.
pub fn default_breakpoints() -> Vec<BreakPoint> {
    vec![
        BreakPoint::new(
            "xs",
            "screen and (min-width: 0px) and (max-width: 599.98px)",
            1000,
        ),
        BreakPoint::new(
            "sm",
            "screen and (min-width: 600px) and (max-width: 959.98px)",
            900,
        ),
        BreakPoint::new(
            "md",
            "screen and (min-width: 960px) and (max-width: 1279.98px)",
            800,
        ),
        BreakPoint::new(
            "lg",
            "screen and (min-width: 1280px) and (max-width: 1919.98px)",
            700,
        ),
        BreakPoint::new(
            "xl",
            "screen and (min-width: 1920px) and (max-width: 4999.98px)",
            600,
        ),
    ]
}

/// Forces breakpoints on and off so responsive directives recompute.
pub trait MatchMedia {
    fn activate_breakpoint(&self, breakpoint: &BreakPoint);
    fn deactivate_breakpoint(&self, breakpoint: &BreakPoint);
}

type Listener = Box<dyn Fn(&BreakPoint, bool)>;

/// A `MatchMedia` that tracks active aliases and tells subscribers about changes.
///
/// Listeners run synchronously inside `activate_breakpoint` and
/// `deactivate_breakpoint`; they must not subscribe further listeners.
#[derive(Default)]
pub struct BreakpointSignal {
    active: RefCell<Vec<String>>,
    listeners: RefCell<Vec<Listener>>,
}

impl BreakpointSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// `listener` receives the breakpoint and whether it just became active.
    pub fn subscribe(&self, listener: impl Fn(&BreakPoint, bool) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn is_active(&self, alias: &str) -> bool {
        self.active.borrow().iter().any(|a| a == alias)
    }

    pub fn active_aliases(&self) -> Vec<String> {
        self.active.borrow().clone()
    }

    fn notify(&self, breakpoint: &BreakPoint, matches: bool) {
        for listener in self.listeners.borrow().iter() {
            listener(breakpoint, matches);
        }
    }
}

impl MatchMedia for BreakpointSignal {
    fn activate_breakpoint(&self, breakpoint: &BreakPoint) {
        debug!("activating breakpoint {}", breakpoint.alias);
        {
            let mut active = self.active.borrow_mut();
            if !active.contains(&breakpoint.alias) {
                active.push(breakpoint.alias.clone());
            }
        }
        self.notify(breakpoint, true);
    }

    fn deactivate_breakpoint(&self, breakpoint: &BreakPoint) {
        debug!("deactivating breakpoint {}", breakpoint.alias);
        self.active.borrow_mut().retain(|a| a != &breakpoint.alias);
        self.notify(breakpoint, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn listeners_see_activation_changes() {
        let signal = BreakpointSignal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        signal.subscribe(move |bp, matches| log.borrow_mut().push((bp.alias.clone(), matches)));

        let md = BreakPoint::new("md", "screen and (min-width: 960px)", 800);
        signal.activate_breakpoint(&md);
        assert!(signal.is_active("md"));
        signal.deactivate_breakpoint(&md);
        assert!(signal.active_aliases().is_empty());

        assert_eq!(
            *seen.borrow(),
            vec![("md".to_string(), true), ("md".to_string(), false)]
        );
    }
}
