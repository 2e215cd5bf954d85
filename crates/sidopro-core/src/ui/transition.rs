//! Page-transition phases for route changes.

/// Phase of the fade played on every route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// Old page fading out, new route not yet committed
    Exiting,
    /// New page fading in
    Entering,
}

/// Transition state owned by the page shell.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    route: String,
    pending: Option<String>,
    phase: TransitionPhase,
}

impl TransitionContext {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            pending: None,
            phase: TransitionPhase::Idle,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Starts a transition to `route`. Returns false if already there.
    pub fn navigate(&mut self, route: impl Into<String>) -> bool {
        let route = route.into();
        if self.pending.is_none() && route == self.route {
            return false;
        }
        self.pending = Some(route);
        self.phase = TransitionPhase::Exiting;
        true
    }

    /// Moves to the next phase, committing the pending route on the way in.
    pub fn advance(&mut self) -> TransitionPhase {
        self.phase = match self.phase {
            TransitionPhase::Exiting => {
                if let Some(route) = self.pending.take() {
                    self.route = route;
                }
                TransitionPhase::Entering
            }
            TransitionPhase::Entering | TransitionPhase::Idle => TransitionPhase::Idle,
        };
        self.phase
    }

    /// Target opacity of the page content for the current phase.
    pub fn opacity(&self) -> f32 {
        match self.phase {
            TransitionPhase::Exiting => 0.0,
            TransitionPhase::Idle | TransitionPhase::Entering => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_transition_cycle() {
        let mut ctx = TransitionContext::new("/");
        assert!(ctx.navigate("/dashboard"));
        assert_eq!(ctx.phase(), TransitionPhase::Exiting);
        assert_eq!(ctx.opacity(), 0.0);
        assert_eq!(ctx.route(), "/");

        assert_eq!(ctx.advance(), TransitionPhase::Entering);
        assert_eq!(ctx.route(), "/dashboard");
        assert_eq!(ctx.opacity(), 1.0);

        assert_eq!(ctx.advance(), TransitionPhase::Idle);
        assert_eq!(ctx.advance(), TransitionPhase::Idle);
    }

    #[test]
    fn test_same_route_is_ignored() {
        let mut ctx = TransitionContext::new("/admin");
        assert!(!ctx.navigate("/admin"));
        assert_eq!(ctx.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_retarget_while_exiting() {
        let mut ctx = TransitionContext::new("/");
        ctx.navigate("/admin");
        assert!(ctx.navigate("/dashboard"));
        ctx.advance();
        assert_eq!(ctx.route(), "/dashboard");
    }
}
