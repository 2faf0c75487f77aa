use std::{fmt, str::FromStr};

use crate::Error;

/// Node resource whose utilization is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Resource {
    /// Number of running allocations against the configured maximum.
    #[default]
    Allocations,
    /// Allocated CPU shares.
    Cpu,
    /// Allocated memory.
    Memory,
    /// Allocated disk space.
    Disk,
}

impl Resource {
    /// All supported resources.
    pub const ALL: [Self; 4] = [Self::Allocations, Self::Cpu, Self::Memory, Self::Disk];

    /// Returns the resource name as used on the command line and in gauge names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Allocations => "allocations",
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownResource(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_from_str() {
        assert_eq!("allocations".parse::<Resource>().unwrap(), Resource::Allocations);
        assert_eq!("CPU".parse::<Resource>().unwrap(), Resource::Cpu);
        assert_eq!("memory".parse::<Resource>().unwrap(), Resource::Memory);
        assert_eq!("disk".parse::<Resource>().unwrap(), Resource::Disk);
        assert!(matches!(
            "network".parse::<Resource>(),
            Err(Error::UnknownResource(name)) if name == "network"
        ));
    }
}
