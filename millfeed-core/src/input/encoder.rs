//! Quadrature decoding for the speed knob
//!
//! Lines are sampled on every edge; each valid Gray-code transition moves an
//! accumulator by one, and a full detent (`steps_per_detent` transitions in
//! the same direction) is reported as a single click. Transitions that skip
//! a state are noise and are ignored; a half turn that comes back cancels out.

/// Movement for each (previous, current) state pair, indexed `prev << 2 | curr`
///
/// The state is `a << 1 | b`. The sequence `00 -> 01 -> 11 -> 10 -> 00`
/// counts up (clockwise on the reference knob).
const TRANSITIONS: [i8; 16] = [0, 1, -1, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, -1, 1, 0];

/// Quadrature decoder state
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: u8,
    count: i8,
    steps_per_detent: i8,
}

impl QuadratureDecoder {
    /// Decoder starting from the current line levels
    pub fn new(a: bool, b: bool, steps_per_detent: u8) -> Self {
        Self {
            state: Self::encode(a, b),
            count: 0,
            steps_per_detent: steps_per_detent.clamp(1, i8::MAX as u8) as i8,
        }
    }

    /// Feed the line levels after an edge
    ///
    /// Returns `+1` or `-1` when a whole detent completes.
    pub fn update(&mut self, a: bool, b: bool) -> Option<i32> {
        let next = Self::encode(a, b);
        let delta = TRANSITIONS[usize::from(self.state << 2 | next)];
        self.state = next;
        if delta == 0 {
            return None;
        }

        self.count += delta;
        if self.count >= self.steps_per_detent {
            self.count = 0;
            Some(1)
        } else if self.count <= -self.steps_per_detent {
            self.count = 0;
            Some(-1)
        } else {
            None
        }
    }

    fn encode(a: bool, b: bool) -> u8 {
        (u8::from(a) << 1) | u8::from(b)
    }
}
