//! Command handlers for the ev-advisor CLI.

mod query;
mod recommend;
mod stats;

pub use query::{run_query, QueryFilter};
pub use recommend::run_recommend;
pub use stats::run_stats;

use crate::model::VehicleRecord;

/// Short CAFV status used in tabular output.
pub(crate) fn cafv_short(vehicle: &VehicleRecord) -> &'static str {
    match &vehicle.cafv_eligibility {
        None => "Unknown",
        Some(text) => {
            let lower = text.to_lowercase();
            if lower.contains("not eligible") {
                "Not eligible"
            } else if lower.contains("eligible") {
                "Eligible"
            } else {
                "Unknown"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VehicleType;

    #[test]
    fn test_cafv_short() {
        let mut v = VehicleRecord::new("Tesla", "Model 3", VehicleType::BatteryElectric);
        assert_eq!(cafv_short(&v), "Unknown");

        v.cafv_eligibility = Some("Clean Alternative Fuel Vehicle Eligible".to_string());
        assert_eq!(cafv_short(&v), "Eligible");

        v.cafv_eligibility = Some("Not eligible due to low battery range".to_string());
        assert_eq!(cafv_short(&v), "Not eligible");

        v.cafv_eligibility =
            Some("Eligibility unknown as battery range has not been researched".to_string());
        assert_eq!(cafv_short(&v), "Unknown");
    }
}
