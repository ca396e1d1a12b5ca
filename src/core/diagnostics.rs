/*!

  Source-location tagging and subscriber setup. `LocationInfo` exists for a
  future front-end to attach to instructions; this crate never constructs
  anything but `Unknown` on its own, but the type is part of the public
  surface since nothing downstream should have to invent it.

*/

use std::sync::Once;

/////
///// Locations
/////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationInfo {
    Unknown,
    FileLineCol(String, usize, usize),
    NameFileLineCol(String, String, usize, usize),
    InlinedFrom(Vec<LocationInfo>),
}

impl std::fmt::Display for LocationInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LocationInfo::Unknown => write!(f, "<unknown location>"),
            LocationInfo::FileLineCol(file, line, col) => {
                write!(f, "<{} @ {}:{}>", file, line, col)
            }
            LocationInfo::NameFileLineCol(name, file, line, col) => {
                write!(f, "<{} @ {}:{}:{}>", name, file, line, col)
            }
            LocationInfo::InlinedFrom(chain) => {
                write!(f, "<inlined from ")?;
                for (i, loc) in chain.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{}", loc)?;
                }
                write!(f, ">")
            }
        }
    }
}

/////
///// Tracing subscriber setup
/////

static SUBSCRIBER_INIT: Once = Once::new();

/// Install a `tracing_subscriber::fmt` subscriber for this process. Safe to
/// call more than once -- only the first call takes effect, so tests can
/// each call it without racing.
pub fn diagnostics_setup() {
    SUBSCRIBER_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_env_filter("warn").try_init();
    });
}

/// Reinstall the subscriber with ANSI color disabled, for environments
/// (CI logs, piped output) where escape codes would corrupt the stream.
pub fn diagnostics_color_disable() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_ansi(false)
        .try_init();
}
