//! TWI model definitions.
//!
//! Each supported Texas Weather Instruments station is described by a
//! [`TwiModel`] struct. The whole family speaks the same one-letter
//! serial protocol at the same fixed 19200 baud; what varies is the
//! sensor package and whether the unit carries an on-board data logger.
//!
//! Models are defined as factory functions (e.g. [`wrl_25()`]) that
//! return a fully populated [`TwiModel`]. The following models are
//! supported:
//!
//! | Model    | Baud  | Logger |
//! |----------|-------|--------|
//! | WLS-8000 | 19200 | Yes    |
//! | WRL-25   | 19200 | No     |
//! | WR-25    | 19200 | No     |
//! | WPS-10   | 19200 | No     |
//!
//! The driver does not probe the hardware to identify the model; the
//! caller states which unit is on the wire, the way an installer reads
//! it off the faceplate.

use wxlib_core::types::StationDefinition;

/// Static model definition for a TWI station.
#[derive(Debug, Clone)]
pub struct TwiModel {
    /// Human-readable model name (e.g. "WRL-25").
    pub name: &'static str,
    /// Machine-readable model identifier (the family prefix).
    pub model_id: &'static str,
    /// Serial baud rate; 19200 across the whole family.
    pub default_baud_rate: u32,
    /// Whether the unit has an on-board data logger.
    ///
    /// The WLS-8000 records history internally; reading that log back
    /// uses paging commands this driver does not issue, so the flag is
    /// informational for pickers and diagnostics.
    pub has_logger: bool,
}

impl From<&TwiModel> for StationDefinition {
    fn from(model: &TwiModel) -> Self {
        StationDefinition {
            model_name: model.name,
            default_baud_rate: model.default_baud_rate,
            has_logger: model.has_logger,
        }
    }
}

/// WLS-8000 model definition.
///
/// The top of the family: full sensor package plus an on-board data
/// logger.
pub fn wls_8000() -> TwiModel {
    TwiModel {
        name: "WLS-8000",
        model_id: "WLS",
        default_baud_rate: 19_200,
        has_logger: true,
    }
}

/// WRL-25 model definition.
///
/// The common field unit and the default model for this driver.
pub fn wrl_25() -> TwiModel {
    TwiModel {
        name: "WRL-25",
        model_id: "WRL",
        default_baud_rate: 19_200,
        has_logger: false,
    }
}

/// WR-25 model definition.
pub fn wr_25() -> TwiModel {
    TwiModel {
        name: "WR-25",
        model_id: "WR",
        default_baud_rate: 19_200,
        has_logger: false,
    }
}

/// WPS-10 model definition.
pub fn wps_10() -> TwiModel {
    TwiModel {
        name: "WPS-10",
        model_id: "WPS",
        default_baud_rate: 19_200,
        has_logger: false,
    }
}

/// All supported TWI models.
pub fn all_twi_models() -> Vec<TwiModel> {
    vec![wls_8000(), wrl_25(), wr_25(), wps_10()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_shares_serial_parameters() {
        for model in all_twi_models() {
            assert_eq!(model.default_baud_rate, 19_200, "{}", model.name);
        }
    }

    #[test]
    fn only_the_wls_has_a_logger() {
        for model in all_twi_models() {
            assert_eq!(model.has_logger, model.model_id == "WLS", "{}", model.name);
        }
    }

    #[test]
    fn model_names_are_unique() {
        let models = all_twi_models();
        for (i, a) in models.iter().enumerate() {
            for b in &models[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.model_id, b.model_id);
            }
        }
    }

    #[test]
    fn station_definition_from_model() {
        let def = StationDefinition::from(&wls_8000());
        assert_eq!(def.model_name, "WLS-8000");
        assert_eq!(def.default_baud_rate, 19_200);
        assert!(def.has_logger);
    }
}
