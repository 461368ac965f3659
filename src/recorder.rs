//! Step recorder for showing calculation work.
//!
//! A [`Recorder`] is an append-only collector of named intermediate values.
//! Functions that can show their work come in `*_recorded` variants taking
//! `Option<&mut Recorder>`; passing `None` makes recording a no-op. The
//! recorder is never stored on core values and is only shared if the caller
//! shares it.
//!
//! ```
//! use starward::coords::IcrsCoord;
//! use starward::recorder::Recorder;
//! use starward::separation::angular_separation_recorded;
//!
//! let sirius = IcrsCoord::from_degrees(101.287, -16.716).unwrap();
//! let betelgeuse = IcrsCoord::from_degrees(88.793, 7.407).unwrap();
//!
//! let mut rec = Recorder::new();
//! let sep = angular_separation_recorded(&sirius, &betelgeuse, Some(&mut rec));
//! assert!(!rec.is_empty());
//! println!("{}", rec.format_steps());
//! ```

use serde::Serialize;

/// A single named calculation step.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub title: String,
    pub content: String,
    pub level: usize,
}

/// Append-only collector of calculation steps.
#[derive(Debug, Default)]
pub struct Recorder {
    steps: Vec<Step>,
    level: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step at the current nesting level.
    pub fn record(&mut self, title: &str, content: impl Into<String>) {
        self.steps.push(Step {
            title: title.to_string(),
            content: content.into(),
            level: self.level,
        });
    }

    /// Opens a named section; steps recorded inside `f` are nested one level.
    pub fn section<R>(&mut self, name: &str, f: impl FnOnce(&mut Recorder) -> R) -> R {
        self.record(&format!("── {name} ──"), "");
        self.level += 1;
        let out = f(self);
        self.level -= 1;
        out
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Renders all steps as indented plain text.
    pub fn format_steps(&self) -> String {
        let mut lines = Vec::new();
        for step in &self.steps {
            let indent = "  ".repeat(step.level);
            lines.push(format!("{indent}┌─ {}", step.title));
            for line in step.content.lines() {
                lines.push(format!("{indent}│  {line}"));
            }
            lines.push(format!("{indent}└{}", "─".repeat(40)));
        }
        lines.join("\n")
    }

    /// Renders all steps as a JSON array.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.steps)
    }
}

/// Records a step into an optional recorder; no-op when `rec` is `None`.
pub(crate) fn note(rec: &mut Option<&mut Recorder>, title: &str, content: String) {
    if let Some(r) = rec.as_deref_mut() {
        r.record(title, content);
    }
}
