/// Encoding mode of the symbol payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mode {
    /// Encoding for digits 0-9.
    Num,
    /// Encoding for digits 0-9, capital letters A-Z and ` $%*+-./:`.
    Alnum,
    /// Encoding for arbitrary byte strings.
    Bytes,
}

impl Mode {
    /// Return the [Mode] that is the most generic between `self` and `other`.
    /// # Example
    /// ```
    /// use qrpix_core::Mode;
    /// assert_eq!(Mode::Alnum.most_generic(Mode::Bytes), Mode::Bytes);
    /// assert_eq!(Mode::Alnum.most_generic(Mode::Num), Mode::Alnum);
    /// ```
    pub fn most_generic(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }

    /// Classify `data` into the tightest mode whose alphabet covers every
    /// byte. [Mode::Bytes] is the universal fallback; empty input is
    /// vacuously numeric.
    /// # Example
    /// ```
    /// use qrpix_core::Mode;
    /// assert_eq!(Mode::classify(b"40162"), Mode::Num);
    /// assert_eq!(Mode::classify(b"hello"), Mode::Bytes);
    /// ```
    pub fn classify(data: &[u8]) -> Self {
        data.iter()
            .map(|&byte| Mode::from(byte))
            .reduce(Mode::most_generic)
            .unwrap_or(Mode::Num)
    }

    /// Four-bit mode indicator opening the data bit stream.
    pub const fn indicator(self) -> u8 {
        match self {
            Mode::Num => 0b0001,
            Mode::Alnum => 0b0010,
            Mode::Bytes => 0b0100,
        }
    }
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            0x30..=0x39 => Mode::Num,
            0x20 | 0x24 | 0x25 | 0x2a | 0x2b | 0x2d..=0x2f | 0x3a | 0x41..=0x5a => Mode::Alnum,
            _ => Mode::Bytes,
        }
    }
}
