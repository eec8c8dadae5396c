use nutype::nutype;

/// 1-based page index. Values below 1 are clamped up to 1.
#[nutype(
    sanitize(with = |page| page.max(1)),
    derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From, Serialize, Deserialize, Default),
    default = 1,
)]
pub struct PageNumber(u64);

impl PageNumber {
    /// Normalizes raw adapter input: missing or non-positive pages become 1.
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(page) if page > 0 => Self::new(page as u64),
            _ => Self::default(),
        }
    }
}

/// Page size. Clamped into `[1, 100]`; requests above the cap are reduced,
/// not rejected.
#[nutype(
    sanitize(with = |limit| limit.clamp(PageLimit::MIN, PageLimit::MAX)),
    derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From, Serialize, Deserialize, Default),
    default = PageLimit::DEFAULT,
)]
pub struct PageLimit(u64);

impl PageLimit {
    pub const MIN: u64 = 1;
    pub const MAX: u64 = 100;
    pub const DEFAULT: u64 = 20;

    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(limit) => Self::new(limit.max(1) as u64),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_normalization() {
        for (raw, expected) in [
            (None, 1),
            (Some(-3), 1),
            (Some(0), 1),
            (Some(1), 1),
            (Some(7), 7),
        ] {
            assert_eq!(*PageNumber::from_raw(raw), expected);
        }
    }

    #[test]
    fn page_limit_normalization() {
        for (raw, expected) in [
            (None, 20),
            (Some(-1), 1),
            (Some(0), 1),
            (Some(1), 1),
            (Some(42), 42),
            (Some(100), 100),
            (Some(500), 100),
        ] {
            assert_eq!(*PageLimit::from_raw(raw), expected);
        }
    }
}
