//! Nullable navigator: records destinations instead of switching views.

use facegate_flow::Navigator;
use facegate_types::Destination;

#[derive(Debug, Default)]
pub struct NullNavigator {
    visited: Vec<Destination>,
}

impl NullNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every destination navigated to, in order.
    pub fn visited(&self) -> &[Destination] {
        &self.visited
    }

    pub fn last(&self) -> Option<&Destination> {
        self.visited.last()
    }
}

impl Navigator for NullNavigator {
    fn navigate(&mut self, destination: &Destination) {
        self.visited.push(destination.clone());
    }
}
