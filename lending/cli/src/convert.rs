use {
    crate::{rate::parse_ray, report::Report},
    clap::Parser,
    lending_math::{RayMath, ScaledDecimal, WAD_DECIMALS},
};

#[derive(Parser)]
pub struct RayToWadCmd {
    /// Value as a raw ray integer
    value: String,
}

impl RayToWadCmd {
    pub fn report(self) -> anyhow::Result<Report> {
        let wad = parse_ray("value", &self.value)?.ray_to_wad()?;

        Ok(Report::new().add("wad", wad).add("wad_raw", wad.value()))
    }
}

#[derive(Parser)]
pub struct WadToRayCmd {
    /// Value as a raw wad integer
    value: String,
}

impl WadToRayCmd {
    pub fn report(self) -> anyhow::Result<Report> {
        let wad = ScaledDecimal::parse_field("value", &self.value, WAD_DECIMALS)?;
        let ray = wad.wad_to_ray()?;

        Ok(Report::new().add("ray", ray).add("ray_raw", ray.value()))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_to_wad_rounds_half_up() {
        let cmd = RayToWadCmd::parse_from(["ray-to-wad", "1500000000"]);
        let report = cmd.report().unwrap();
        assert_eq!(report.get("wad_raw"), Some("2"));
        assert_eq!(report.get("wad"), Some("0.000000000000000002"));
    }

    #[test]
    fn wad_to_ray_is_exact() {
        let cmd = WadToRayCmd::parse_from(["wad-to-ray", "1000000000000000000"]);
        let report = cmd.report().unwrap();
        assert_eq!(report.get("ray_raw"), Some("1000000000000000000000000000"));
    }
}
