// Last known pointer position and the radius inside which particles react to it

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    pos: Option<[f64; 2]>,
    pub radius: f64,
}

impl PointerState {
    pub const DEFAULT_RADIUS: f64 = 150.0;

    pub fn new(radius: f64) -> Self {
        PointerState { pos: None, radius }
    }

    pub fn at(x: f64, y: f64, radius: f64) -> Self {
        PointerState {
            pos: Some([x, y]),
            radius,
        }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    // Pointer left the viewport
    pub fn clear(&mut self) {
        self.pos = None;
    }

    pub fn position(&self) -> Option<[f64; 2]> {
        self.pos
    }

    pub fn is_active(&self) -> bool {
        self.pos.is_some()
    }
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState::new(PointerState::DEFAULT_RADIUS)
    }
}
