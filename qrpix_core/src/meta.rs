use crate::qrstandard;

/// Collection of metadata about a QR code.
#[derive(Debug, Clone)]
pub struct Meta {
    pub version: Version,
    pub ecl: Ecl,
    pub mask: Mask,
}

impl Meta {
    pub fn canvas_size(&self) -> usize {
        qrstandard::canvas_size(self.version)
    }
}

/// Version of a QR code, which determines its size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    /// Construct a new version given its number. Valid version numbers are in
    /// the range 1..=40.
    /// # Example
    /// ```
    /// use qrpix_core::Version;
    /// assert!(Version::new(4).is_some());
    /// assert!(Version::new(41).is_none());
    /// ```
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1..=40 => Some(Self(number)),
            _ => None,
        }
    }

    /// Get the version number.
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<Version> for u8 {
    fn from(value: Version) -> Self {
        value.number()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.number())
    }
}

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ecl {
    /// Low: 7% recovery rate.
    L,
    /// Medium: 15% recovery rate.
    M,
    /// Quartile: 25% recovery rate.
    Q,
    /// High: 30% recovery rate.
    H,
}

impl Ecl {
    /// Two-bit code representing the level inside the format information.
    pub const fn code(self) -> u8 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    /// Index of the level in the version tables, in L, M, Q, H order.
    pub(crate) const fn table_index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Ecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::L => 'L',
            Self::M => 'M',
            Self::Q => 'Q',
            Self::H => 'H',
        };
        write!(f, "{}", letter)
    }
}

/// Data mask used in the QR code, identified by its three-bit code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mask(u8);

impl Mask {
    /// Construct a new mask given its `code`. Valid codes are in the range 0..=7.
    pub const fn new(code: u8) -> Option<Self> {
        match code {
            0..=7 => Some(Self(code)),
            _ => None,
        }
    }

    /// Get the code associated to the mask.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// All eight masks in code order.
    pub fn all() -> impl Iterator<Item = Mask> {
        (0..NUM_MASKS as u8).map(Mask)
    }

    /// Get the inversion rule of this mask over positions `(i, j)`: wherever
    /// the rule holds, the data module at `(i, j)` is inverted.
    pub fn rule(self) -> fn(usize, usize) -> bool {
        match self.0 {
            0 => |i, j| (i + j) % 2 == 0,
            1 => |i, _| i % 2 == 0,
            2 => |_, j| j % 3 == 0,
            3 => |i, j| (i + j) % 3 == 0,
            4 => |i, j| (i / 2 + j / 3) % 2 == 0,
            5 => |i, j| (i * j) % 2 + (i * j) % 3 == 0,
            6 => |i, j| ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            _ => |i, j| ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl std::fmt::Display for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{:03b}", self.0)
    }
}

const NUM_MASKS: usize = 8;

/// Table mapping each possible [Mask] to an arbitrary value of generic type `T`.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct MaskTable<T> {
    data: [T; NUM_MASKS],
}

impl<T> MaskTable<T> {
    /// Visit every entry in mask code order.
    pub fn iter(&self) -> impl Iterator<Item = (Mask, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(code, value)| (Mask(code as u8), value))
    }
}

impl<T: Clone> MaskTable<T> {
    /// Fill the table with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MaskTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{")?;
        for (mask, value) in self.iter() {
            writeln!(f, "    {} => {:?},", mask, value)?;
        }
        writeln!(f, "}}")
    }
}

impl<T> From<[T; NUM_MASKS]> for MaskTable<T> {
    fn from(value: [T; NUM_MASKS]) -> Self {
        Self { data: value }
    }
}

impl<T> std::ops::Index<Mask> for MaskTable<T> {
    type Output = T;

    fn index(&self, index: Mask) -> &Self::Output {
        &self.data[index.code() as usize]
    }
}

impl<T> std::ops::IndexMut<Mask> for MaskTable<T> {
    fn index_mut(&mut self, index: Mask) -> &mut Self::Output {
        &mut self.data[index.code() as usize]
    }
}
