// Colour domain model
use crate::domain::error::TrackError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl FromStr for Colour {
    type Err = TrackError;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackError::InvalidColour(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Colour::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!("#0000ff".parse::<Colour>().unwrap(), Colour::BLUE);
        assert_eq!("#FF8000".parse::<Colour>().unwrap(), Colour::rgb(255, 128, 0));
        assert_eq!(Colour::rgb(255, 128, 0).to_string(), "#ff8000");
    }

    #[test]
    fn test_reject_malformed_colour() {
        assert!("0000ff".parse::<Colour>().is_err());
        assert!("#00ff".parse::<Colour>().is_err());
        assert!("#gg0000".parse::<Colour>().is_err());
    }
}
