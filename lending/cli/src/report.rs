use {
    crate::config::DisplayConfig,
    lending_math::{to_percent, ScaledDecimal},
    serde_json::{Map, Value},
};

/// The labelled values a command prints, in the order they were added.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<(&'static str, String)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, label: &'static str, value: impl ToString) -> Self {
        self.entries.push((label, value.to_string()));
        self
    }

    /// Add a rate as a percentage, e.g. `5.1271%`.
    pub fn add_percent(
        self,
        label: &'static str,
        rate: ScaledDecimal,
        display: &DisplayConfig,
    ) -> anyhow::Result<Self> {
        let percent = to_percent(rate)?;
        let places = display.decimal_places as usize;

        Ok(self.add(label, format!("{percent:.places$}%")))
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn render(&self, display: &DisplayConfig) -> anyhow::Result<String> {
        if display.json {
            let map = self
                .entries
                .iter()
                .map(|(label, value)| (label.to_string(), Value::String(value.clone())))
                .collect::<Map<_, _>>();

            return Ok(serde_json::to_string_pretty(&map)?);
        }

        let width = self
            .entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or_default();

        Ok(self
            .entries
            .iter()
            .map(|(label, value)| format!("{label:<width$}  {value}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn print(&self, display: &DisplayConfig) -> anyhow::Result<()> {
        println!("{}", self.render(display)?);
        Ok(())
    }
}

// ----------------------------------- tests -----------------------------------
