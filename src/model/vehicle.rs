//! Individual vehicle registration records.

use serde::{Deserialize, Serialize};

/// Full dataset label for battery-electric vehicles.
pub const BEV_LABEL: &str = "Battery Electric Vehicle (BEV)";

/// Full dataset label for plug-in hybrid vehicles.
pub const PHEV_LABEL: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// Powertrain category of a registered vehicle.
///
/// The registration dataset uses two long-form labels (BEV and PHEV);
/// anything else is preserved verbatim so unrecognized categories can be
/// filtered out rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    /// Battery Electric Vehicle (BEV)
    BatteryElectric,
    /// Plug-in Hybrid Electric Vehicle (PHEV)
    PluginHybrid,
    /// Unrecognized category, raw label preserved
    Other(String),
}

impl VehicleType {
    /// Parse a raw dataset label into a vehicle type.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            BEV_LABEL => Self::BatteryElectric,
            PHEV_LABEL => Self::PluginHybrid,
            other => Self::Other(other.to_string()),
        }
    }

    /// Full dataset label for this type.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::BatteryElectric => BEV_LABEL,
            Self::PluginHybrid => PHEV_LABEL,
            Self::Other(raw) => raw,
        }
    }

    /// Short abbreviation (BEV / PHEV), or the raw label for other types.
    #[must_use]
    pub fn short_label(&self) -> &str {
        match self {
            Self::BatteryElectric => "BEV",
            Self::PluginHybrid => "PHEV",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for VehicleType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<VehicleType> for String {
    fn from(vt: VehicleType) -> Self {
        vt.label().to_string()
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the registration dataset.
///
/// Every field except make, model, and vehicle type may be absent; all
/// downstream computations degrade gracefully on `None`. Records are
/// immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Manufacturer name
    pub make: String,
    /// Model name
    pub model: String,
    /// Vehicle powertrain category
    pub vehicle_type: VehicleType,
    /// Model year
    pub model_year: Option<u16>,
    /// Electric range in miles
    pub electric_range: Option<f64>,
    /// Base MSRP in dollars
    pub base_msrp: Option<f64>,
    /// Clean Alternative Fuel Vehicle eligibility status (free text)
    pub cafv_eligibility: Option<String>,
    /// Registration county
    pub county: Option<String>,
    /// Registration city
    pub city: Option<String>,
    /// Registration state
    pub state: Option<String>,
    /// Longitude extracted from the vehicle location point
    pub longitude: Option<f64>,
    /// Latitude extracted from the vehicle location point
    pub latitude: Option<f64>,
}

impl VehicleRecord {
    /// Create a record with the essential identity fields; everything else
    /// starts absent.
    #[must_use]
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            vehicle_type,
            model_year: None,
            electric_range: None,
            base_msrp: None,
            cafv_eligibility: None,
            county: None,
            city: None,
            state: None,
            longitude: None,
            latitude: None,
        }
    }

    /// "Make Model" display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Whether the CAFV eligibility text contains "eligible"
    /// (case-insensitive substring, matching the source dataset's wording).
    #[must_use]
    pub fn is_cafv_eligible(&self) -> bool {
        self.cafv_eligibility
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("eligible"))
    }

    /// Raw value ratio: miles of range per dollar of MSRP (+1 to avoid
    /// division by zero). `None` when either field is unknown.
    #[must_use]
    pub fn value_ratio(&self) -> Option<f64> {
        match (self.electric_range, self.base_msrp) {
            (Some(range), Some(msrp)) => Some(range / (msrp + 1.0)),
            _ => None,
        }
    }

    /// Human-friendly value figure: miles of range per $1000 of MSRP.
    /// `None` when either field is unknown or the price is zero.
    #[must_use]
    pub fn miles_per_thousand(&self) -> Option<f64> {
        match (self.electric_range, self.base_msrp) {
            (Some(range), Some(msrp)) if msrp > 0.0 => Some(range / (msrp / 1000.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_parse() {
        assert_eq!(
            VehicleType::parse("Battery Electric Vehicle (BEV)"),
            VehicleType::BatteryElectric
        );
        assert_eq!(
            VehicleType::parse("Plug-in Hybrid Electric Vehicle (PHEV)"),
            VehicleType::PluginHybrid
        );
        assert_eq!(
            VehicleType::parse("Fuel Cell"),
            VehicleType::Other("Fuel Cell".to_string())
        );
    }

    #[test]
    fn test_vehicle_type_parse_trims() {
        assert_eq!(
            VehicleType::parse("  Battery Electric Vehicle (BEV) "),
            VehicleType::BatteryElectric
        );
    }

    #[test]
    fn test_vehicle_type_labels() {
        assert_eq!(VehicleType::BatteryElectric.short_label(), "BEV");
        assert_eq!(VehicleType::PluginHybrid.short_label(), "PHEV");
        assert_eq!(VehicleType::BatteryElectric.label(), BEV_LABEL);
    }

    #[test]
    fn test_cafv_eligible_substring() {
        let mut v = VehicleRecord::new("Tesla", "Model 3", VehicleType::BatteryElectric);
        assert!(!v.is_cafv_eligible());

        v.cafv_eligibility = Some("Clean Alternative Fuel Vehicle Eligible".to_string());
        assert!(v.is_cafv_eligible());

        // Substring match: "Not eligible ..." also contains "eligible".
        v.cafv_eligibility = Some("Not eligible due to low battery range".to_string());
        assert!(v.is_cafv_eligible());

        v.cafv_eligibility = Some("Eligibility unknown as battery range has not been researched".to_string());
        assert!(!v.is_cafv_eligible());
    }

    #[test]
    fn test_value_ratio() {
        let mut v = VehicleRecord::new("Nissan", "Leaf", VehicleType::BatteryElectric);
        assert_eq!(v.value_ratio(), None);

        v.electric_range = Some(150.0);
        assert_eq!(v.value_ratio(), None);

        v.base_msrp = Some(29_999.0);
        assert_eq!(v.value_ratio(), Some(150.0 / 30_000.0));
    }

    #[test]
    fn test_miles_per_thousand() {
        let mut v = VehicleRecord::new("Chevrolet", "Bolt EV", VehicleType::BatteryElectric);
        v.electric_range = Some(250.0);
        v.base_msrp = Some(35_000.0);
        let mpk = v.miles_per_thousand().unwrap();
        assert!((mpk - 250.0 / 35.0).abs() < 1e-9);

        v.base_msrp = Some(0.0);
        assert_eq!(v.miles_per_thousand(), None);
    }
}
