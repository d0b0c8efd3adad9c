/// Small state-machine container for per-body controllers.
///
/// `S` is usually an enum whose variants may carry data. The machine keeps
/// the current state plus the seconds spent in it. Transition rules live
/// with the system that drives the machine, not here.
///
/// ```
/// use tumble::fsm::StateMachine;
///
/// #[derive(Clone, Debug)]
/// enum Light { Off, On { level: u8 } }
///
/// let mut fsm = StateMachine::new(Light::Off);
/// fsm.go(Light::On { level: 3 });
/// fsm.tick(0.5);
/// assert_eq!(fsm.elapsed, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct StateMachine<S: Clone> {
    pub state: S,
    /// Seconds in the current state. Cleared on every transition.
    pub elapsed: f32,
}

impl<S: Clone> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            elapsed: 0.0,
        }
    }

    /// Enter `next` if it is a different variant than the current state
    /// (compared by discriminant, so `S` needs no `PartialEq`).
    pub fn go(&mut self, next: S) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            self.state = next;
            self.elapsed = 0.0;
        }
    }

    /// Put the machine back into `initial` with a cleared timer, whatever
    /// variant it is in now.
    pub fn reset(&mut self, initial: S) {
        self.state = initial;
        self.elapsed = 0.0;
    }

    /// Advance the in-state timer. Call once per frame after transitions
    /// have been processed.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Phase {
        A,
        B(u32),
    }

    #[test]
    fn same_variant_is_not_a_transition() {
        let mut fsm = StateMachine::new(Phase::B(1));
        fsm.tick(1.0);
        fsm.go(Phase::B(2));
        assert_eq!(fsm.state, Phase::B(1));
        assert_eq!(fsm.elapsed, 1.0);
    }

    #[test]
    fn transition_clears_timer() {
        let mut fsm = StateMachine::new(Phase::A);
        fsm.tick(0.25);
        fsm.go(Phase::B(7));
        assert_eq!(fsm.state, Phase::B(7));
        assert_eq!(fsm.elapsed, 0.0);
        fsm.tick(0.1);
        assert_eq!(fsm.elapsed, 0.1);
    }

    #[test]
    fn reset_restores_initial() {
        let mut fsm = StateMachine::new(Phase::A);
        fsm.go(Phase::B(3));
        fsm.tick(2.0);
        fsm.reset(Phase::A);
        assert_eq!(fsm.state, Phase::A);
        assert_eq!(fsm.elapsed, 0.0);
    }
}
