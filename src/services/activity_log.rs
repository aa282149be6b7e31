//! Activity log layer for tracing
//!
//! User actions on a form session are emitted as tracing events with target
//! [`ACTIVITY_TARGET`]. This layer writes just those events, timestamped, to
//! a file so a session can be replayed by eye afterwards.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

pub use crate::app::ACTIVITY_TARGET;

/// A tracing layer that writes activity events to a file
pub struct ActivityLogLayer {
    file: Arc<Mutex<File>>,
}

/// Handle returned from setup, containing the log path
pub struct ActivityLogHandle {
    pub path: PathBuf,
}

/// Default location: `<data dir>/dynform/activity.log`
pub fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dynform")
        .join("activity.log")
}

/// Create an activity log layer writing to `path`
///
/// Returns the layer (to add to the tracing subscriber) and a handle.
pub fn create_with_path(path: PathBuf) -> std::io::Result<(ActivityLogLayer, ActivityLogHandle)> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    let layer = ActivityLogLayer {
        file: Arc::new(Mutex::new(file)),
    };

    Ok((layer, ActivityLogHandle { path }))
}

impl<S> Layer<S> for ActivityLogLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != ACTIVITY_TARGET {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} {}\n", timestamp, visitor.finish());

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Collects the message followed by `key=value` for every other field
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<String>,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl tracing::field::Visit for LineVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}
