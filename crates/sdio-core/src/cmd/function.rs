//! SDIO function numbers

use core::fmt;

/// An SDIO function number in `0..=7`
///
/// Function 0 is the common I/O area (CCCR/CIS); functions 1-7 are the
/// card's independently addressable I/O functions. Values above 7 cannot be
/// represented, so every argument built from a `FunctionNumber` stays inside
/// the 3-bit function field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionNumber(u8);

impl FunctionNumber {
    /// Function 0 (common I/O area)
    pub const F0: Self = Self(0);
    /// Function 1
    pub const F1: Self = Self(1);
    /// Function 2
    pub const F2: Self = Self(2);
    /// Function 3
    pub const F3: Self = Self(3);
    /// Function 4
    pub const F4: Self = Self(4);
    /// Function 5
    pub const F5: Self = Self(5);
    /// Function 6
    pub const F6: Self = Self(6);
    /// Function 7
    pub const F7: Self = Self(7);

    /// Highest valid function number
    pub const MAX: u8 = 7;

    /// Create a function number, returning `None` if `num > 7`
    pub const fn new(num: u8) -> Option<Self> {
        if num <= Self::MAX {
            Some(Self(num))
        } else {
            None
        }
    }

    /// Raw function number
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over all eight function numbers
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for FunctionNumber {
    type Error = crate::error::Error;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        Self::new(num).ok_or(crate::error::Error::InvalidArgument)
    }
}

impl From<FunctionNumber> for u8 {
    fn from(func: FunctionNumber) -> u8 {
        func.0
    }
}

impl fmt::Display for FunctionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert_eq!(FunctionNumber::new(0), Some(FunctionNumber::F0));
        assert_eq!(FunctionNumber::new(7), Some(FunctionNumber::F7));
        assert_eq!(FunctionNumber::new(8), None);
        assert!(FunctionNumber::try_from(200u8).is_err());
        assert_eq!(FunctionNumber::all().count(), 8);
    }
}
