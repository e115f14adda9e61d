use std::fmt;

/// Byte order used for multi-byte values on a stream.
///
/// `System` is the host's native order. It is resolved to `Little` or `Big`
/// whenever a value is encoded, so it never ends up recorded in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
    System,
}

impl ByteOrder {
    pub fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::System if cfg!(target_endian = "big") => ByteOrder::Big,
            ByteOrder::System => ByteOrder::Little,
            order => order,
        }
    }

    pub fn is_big(self) -> bool {
        self.resolve() == ByteOrder::Big
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::Little
    }
}

/// Format version carried alongside a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

impl Version {
    pub fn new(major: u8, minor: u8, revision: u8) -> Self {
        Version {
            major,
            minor,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_resolves_to_host_order() {
        let expected = if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
        assert_eq!(ByteOrder::System.resolve(), expected);
        assert_eq!(ByteOrder::Big.resolve(), ByteOrder::Big);
        assert_eq!(ByteOrder::Little.resolve(), ByteOrder::Little);
    }

    #[test]
    fn versions_order_by_component() {
        assert!(Version::new(1, 2, 0) > Version::new(1, 1, 9));
        assert_eq!(Version::new(2, 0, 1).to_string(), "2.0.1");
    }
}
