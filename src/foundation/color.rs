use crate::foundation::error::{ReelError, ReelResult};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a hex string (`"#rrggbbaa"`); parsing also accepts `#rgb`, `#rrggbb` and a few
/// CSS names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::RED),
            "green" => Ok(Self::rgb(0, 128, 0)),
            "lime" => Ok(Self::rgb(0, 255, 0)),
            "blue" => Ok(Self::rgb(0, 0, 255)),
            "yellow" => Ok(Self::rgb(255, 255, 0)),
            "gray" | "grey" => Ok(Self::rgb(128, 128, 128)),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Err(ReelError::validation(format!("unknown color '{s}'"))),
        }
    }

    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

fn parse_hex(hex: &str) -> ReelResult<Rgba8> {
    fn nibble(c: u8) -> ReelResult<u8> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ReelError::validation("hex color contains a non-hex digit")),
        }
    }

    let bytes = hex.as_bytes();
    let channels = match bytes.len() {
        3 => {
            let mut out = [255u8; 4];
            for (i, &c) in bytes.iter().enumerate() {
                let n = nibble(c)?;
                out[i] = (n << 4) | n;
            }
            out
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (i, pair) in bytes.chunks(2).enumerate() {
                out[i] = (nibble(pair[0])? << 4) | nibble(pair[1])?;
            }
            out
        }
        _ => {
            return Err(ReelError::validation(
                "hex color must have 3, 6 or 8 digits",
            ));
        }
    };

    Ok(Rgba8 {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        a: channels[3],
    })
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba8::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
