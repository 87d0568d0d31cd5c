use {
    crate::{config::DisplayConfig, report::Report},
    anyhow::Context,
    clap::Parser,
    lending_math::{current_timestamp, RawReserveData, ReserveData, ScaledDecimal},
    std::{fs, path::PathBuf},
};

#[derive(Parser)]
pub struct ReserveCmd {
    /// JSON file holding the reserve data returned by the lending pool
    file: PathBuf,

    /// Time to preview the indices at, in seconds since the Unix epoch
    /// [default: now]
    #[arg(long)]
    now: Option<u64>,

    /// Scaled balance to preview, as a raw integer in the asset's own units
    #[arg(long)]
    scaled_balance: Option<String>,

    /// Scaled debt to preview, as a raw integer in the asset's own units
    #[arg(long)]
    scaled_debt: Option<String>,
}

impl ReserveCmd {
    pub fn report(self, display: &DisplayConfig) -> anyhow::Result<Report> {
        let json = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let raw: RawReserveData = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", self.file.display()))?;
        let reserve = ReserveData::parse(&raw)?;

        let now = self.now.unwrap_or_else(current_timestamp);

        tracing::debug!(now, last_update = reserve.last_update_timestamp, "Previewing reserve");

        let mut report = Report::new()
            .add_percent("supply_apy", reserve.supply_apy()?, display)?
            .add_percent("borrow_apy", reserve.borrow_apy()?, display)?
            .add("normalized_income", reserve.normalized_income(now)?)
            .add("normalized_debt", reserve.normalized_debt(now)?);

        if let Some(raw) = &self.scaled_balance {
            let scaled = ScaledDecimal::parse_field("scaled_balance", raw, 0)?;
            report = report.add("balance", reserve.preview_balance(scaled, now)?);
        }

        if let Some(raw) = &self.scaled_debt {
            let scaled = ScaledDecimal::parse_field("scaled_debt", raw, 0)?;
            report = report.add("debt", reserve.preview_debt(scaled, now)?);
        }

        Ok(report)
    }
}

// ----------------------------------- tests -----------------------------------
