//! TWI command tokens.
//!
//! The station protocol is a single ASCII letter per request; the station
//! answers with one terminated line. This module defines the commands the
//! driver issues and their wire bytes.
//!
//! The full vendor command set also includes `C,c,D,d,E,e,M,m,Q,T,N,A,P,
//! B,z,Z,L` (min/max records, logged history paging, lightning and
//! leaf-wetness extensions). Those share the same one-letter framing but
//! are not issued by this driver.

use std::fmt;

/// Which of the two vendor current-conditions commands to use.
///
/// The protocol defines both: `R` reports rate-based rain fields, `r`
/// reports term (accumulated) rain fields. Both produce the same
/// 12-token response grammar, so the choice is configuration rather than
/// a protocol fork. Deployed stations differ in which one they answer
/// reliably, which is why it is selectable on the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionsVariant {
    /// The `R` command (rate-based rain fields).
    Rate,
    /// The `r` command (term rain fields). The default.
    #[default]
    Term,
}

impl ConditionsVariant {
    /// The wire byte for this variant.
    pub fn byte(self) -> u8 {
        match self {
            ConditionsVariant::Rate => b'R',
            ConditionsVariant::Term => b'r',
        }
    }
}

/// A command the driver can issue to the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `V` -- firmware version, free-form vendor text.
    FirmwareVersion,
    /// `S` -- firmware serial number, free-form vendor text.
    FirmwareSerial,
    /// `I` -- unit id, free-form vendor text.
    UnitId,
    /// `R` or `r` -- one current-conditions line in the fixed 12-token
    /// grammar.
    CurrentConditions(ConditionsVariant),
}

impl Command {
    /// The single wire byte sent for this command.
    pub fn byte(self) -> u8 {
        match self {
            Command::FirmwareVersion => b'V',
            Command::FirmwareSerial => b'S',
            Command::UnitId => b'I',
            Command::CurrentConditions(variant) => variant.byte(),
        }
    }

    /// The command letter, for log and error messages.
    pub fn letter(self) -> char {
        self.byte() as char
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_wire_bytes() {
        assert_eq!(Command::FirmwareVersion.byte(), b'V');
        assert_eq!(Command::FirmwareSerial.byte(), b'S');
        assert_eq!(Command::UnitId.byte(), b'I');
        assert_eq!(
            Command::CurrentConditions(ConditionsVariant::Rate).byte(),
            b'R'
        );
        assert_eq!(
            Command::CurrentConditions(ConditionsVariant::Term).byte(),
            b'r'
        );
    }

    #[test]
    fn conditions_variant_defaults_to_term() {
        assert_eq!(ConditionsVariant::default(), ConditionsVariant::Term);
        assert_eq!(
            Command::CurrentConditions(ConditionsVariant::default()).byte(),
            b'r'
        );
    }

    #[test]
    fn command_display_is_the_letter() {
        assert_eq!(Command::FirmwareVersion.to_string(), "V");
        assert_eq!(
            Command::CurrentConditions(ConditionsVariant::Term).to_string(),
            "r"
        );
    }
}
