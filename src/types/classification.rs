use std::fmt;

use super::device::Device;
use super::os::Os;
use super::user_agent::UserAgent;

/// The aggregate result of classifying one user-agent string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Classification {
    pub user_agent: UserAgent,
    pub os: Os,
    pub device: Device,
}

impl Classification {
    pub fn new(user_agent: UserAgent, os: Os, device: Device) -> Self {
        Self {
            user_agent,
            os,
            device,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.user_agent, self.os, self.device)
    }
}
