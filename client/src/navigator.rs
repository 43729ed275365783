//! Navigator that writes the destination to an output stream.

use facegate_flow::Navigator;
use facegate_types::Destination;
use serde_json::json;
use std::io::Write;

/// Emits one JSON line per navigation: `{"route": ..., "state": ...}`.
///
/// The next view (a browser shell, a kiosk launcher) reads the line and
/// opens `route` with `state` as its handoff.
pub struct PrintNavigator<W> {
    out: W,
}

impl PrintNavigator<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> PrintNavigator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Navigator for PrintNavigator<W> {
    fn navigate(&mut self, destination: &Destination) {
        let line = json!({
            "route": destination.route(),
            "state": destination.handoff(),
        });
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(route = destination.route(), "failed to emit navigation: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn writes_route_and_state() {
        let mut nav = PrintNavigator::new(Vec::new());
        nav.navigate(&Destination::Admin {
            admin: "23BD1A056D".into(),
        });
        let out = String::from_utf8(nav.into_inner()).unwrap();
        let line: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(line["route"], "/home");
        assert_eq!(line["state"]["admin"], "23BD1A056D");
    }
}
