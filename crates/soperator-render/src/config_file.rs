//! Line-oriented config file text

/// Config file built line by line and rendered in insertion order.
///
/// Lines are passed through verbatim, indentation included. Rendering joins
/// them with `\n` and adds no trailing newline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawConfig {
    lines: Vec<String>,
}

impl RawConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line after all previously added ones
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Render the config text
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
