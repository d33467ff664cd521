//! Global section: base class, lifecycle method names and global methods

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MethodDef;

/// Reserved structural role a global method can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleRole {
    Release,
    Acquire,
    SymbolLookup,
    Injection,
    Journal,
    Version,
    Error,
    Prerelease,
    Buildinfo,
}

impl LifecycleRole {
    /// All roles, in the order their templates are matched
    pub const ALL: [LifecycleRole; 9] = [
        LifecycleRole::Release,
        LifecycleRole::Acquire,
        LifecycleRole::SymbolLookup,
        LifecycleRole::Injection,
        LifecycleRole::Journal,
        LifecycleRole::Version,
        LifecycleRole::Error,
        LifecycleRole::Prerelease,
        LifecycleRole::Buildinfo,
    ];

    /// Roles every component with global methods must configure
    pub const REQUIRED: [LifecycleRole; 4] = [
        LifecycleRole::Release,
        LifecycleRole::Acquire,
        LifecycleRole::Version,
        LifecycleRole::Error,
    ];

    /// Attribute on `<global>` that names the method
    pub fn attribute(self) -> &'static str {
        match self {
            LifecycleRole::Release => "releasemethod",
            LifecycleRole::Acquire => "acquiremethod",
            LifecycleRole::SymbolLookup => "symbollookupmethod",
            LifecycleRole::Injection => "injectionmethod",
            LifecycleRole::Journal => "journalmethod",
            LifecycleRole::Version => "versionmethod",
            LifecycleRole::Error => "errormethod",
            LifecycleRole::Prerelease => "prereleasemethod",
            LifecycleRole::Buildinfo => "buildinfomethod",
        }
    }
}

impl fmt::Display for LifecycleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleRole::Release => "Release",
            LifecycleRole::Acquire => "Acquire",
            LifecycleRole::SymbolLookup => "SymbolLookup",
            LifecycleRole::Injection => "Injection",
            LifecycleRole::Journal => "Journal",
            LifecycleRole::Version => "Version",
            LifecycleRole::Error => "Error",
            LifecycleRole::Prerelease => "Prerelease",
            LifecycleRole::Buildinfo => "Buildinfo",
        };
        f.write_str(name)
    }
}

/// `<global>` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Global {
    #[serde(rename = "@baseclassname", default)]
    pub base_class_name: String,
    #[serde(rename = "@errormethod", default)]
    pub error_method: String,
    #[serde(rename = "@releasemethod", default)]
    pub release_method: String,
    #[serde(rename = "@acquiremethod", default)]
    pub acquire_method: String,
    #[serde(rename = "@symbollookupmethod", default)]
    pub symbol_lookup_method: String,
    #[serde(rename = "@injectionmethod", default)]
    pub injection_method: String,
    #[serde(rename = "@journalmethod", default)]
    pub journal_method: String,
    #[serde(rename = "@versionmethod", default)]
    pub version_method: String,
    #[serde(rename = "@prereleasemethod", default)]
    pub prerelease_method: String,
    #[serde(rename = "@buildinfomethod", default)]
    pub buildinfo_method: String,
    #[serde(rename = "method", default)]
    pub methods: Vec<MethodDef>,
}

impl Global {
    /// Configured method name for a role (empty when unset)
    pub fn method_name(&self, role: LifecycleRole) -> &str {
        match role {
            LifecycleRole::Release => &self.release_method,
            LifecycleRole::Acquire => &self.acquire_method,
            LifecycleRole::SymbolLookup => &self.symbol_lookup_method,
            LifecycleRole::Injection => &self.injection_method,
            LifecycleRole::Journal => &self.journal_method,
            LifecycleRole::Version => &self.version_method,
            LifecycleRole::Error => &self.error_method,
            LifecycleRole::Prerelease => &self.prerelease_method,
            LifecycleRole::Buildinfo => &self.buildinfo_method,
        }
    }

    /// The role a global method plays, if its name is a configured lifecycle name
    pub fn role_of(&self, method: &MethodDef) -> Option<LifecycleRole> {
        LifecycleRole::ALL.into_iter().find(|&role| {
            let name = self.method_name(role);
            !name.is_empty() && name == method.name
        })
    }
}
