/// One of the identity checks the tool runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Check {
    /// rusoto credential chain with shared profile files.
    Legacy,
    /// aws-config default chain.
    Modern,
    /// rusoto credential chain restricted to environment, container and
    /// instance metadata.
    LegacyNoSharedConfig,
}

impl Check {
    /// Run order of a full diagnostic pass.
    pub const ALL: [Check; 3] = [Check::Legacy, Check::Modern, Check::LegacyNoSharedConfig];

    pub fn name(&self) -> &'static str {
        match self {
            Check::Legacy => "legacy",
            Check::Modern => "modern",
            Check::LegacyNoSharedConfig => "legacy-no-shared-config",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Check::Legacy => "Version 1",
            Check::Modern => "Version 2",
            Check::LegacyNoSharedConfig => "NO AWS SSO/Identity: Version 1 NoShared",
        }
    }

    /// Printed ahead of the error when this check fails.
    pub fn failure_hint(&self) -> Option<&'static str> {
        match self {
            Check::LegacyNoSharedConfig => Some("You appear to be picking up AWS SSO"),
            _ => None,
        }
    }
}
