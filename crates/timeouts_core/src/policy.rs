//! Timeout durations per test-file class
//!
//! A `TimeoutPolicy` is built once at startup and passed by reference into
//! the rewriter and the batch driver. Nothing here is global.

use std::collections::BTreeSet;

/// Timeout for ordinary test files, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Timeout for files that perform discovery or other network operations, in seconds
pub const NETWORK_TIMEOUT_SECS: u64 = 10;

/// Test files that talk to the network and get the longer timeout
pub const DEFAULT_NETWORK_FILES: &[&str] = &["discovery_test.dart", "zonegroupstate_test.dart"];

/// Classification of a test file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    Default,
    Network,
}

impl FileClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FileClass::Default => "default",
            FileClass::Network => "network",
        }
    }
}

/// Immutable mapping from file class to timeout duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Seconds for files not in `network_files`
    pub default_secs: u64,
    /// Seconds for files in `network_files`
    pub network_secs: u64,
    /// File names (not paths) classified as network tests
    pub network_files: BTreeSet<String>,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            default_secs: DEFAULT_TIMEOUT_SECS,
            network_secs: NETWORK_TIMEOUT_SECS,
            network_files: DEFAULT_NETWORK_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TimeoutPolicy {
    /// Create a policy with the built-in durations and network file set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_secs(mut self, secs: u64) -> Self {
        self.default_secs = secs;
        self
    }

    pub fn with_network_secs(mut self, secs: u64) -> Self {
        self.network_secs = secs;
        self
    }

    /// Replace the network file set
    pub fn with_network_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.network_files = names.into_iter().map(Into::into).collect();
        self
    }

    /// Classify a file by its name.
    pub fn classify(&self, file_name: &str) -> FileClass {
        if self.network_files.contains(file_name) {
            FileClass::Network
        } else {
            FileClass::Default
        }
    }

    pub fn duration_for(&self, class: FileClass) -> u64 {
        match class {
            FileClass::Default => self.default_secs,
            FileClass::Network => self.network_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default policy tests
    // ========================================

    #[test]
    fn test_default_durations() {
        let policy = TimeoutPolicy::default();
        assert_eq!(policy.default_secs, 5);
        assert_eq!(policy.network_secs, 10);
    }

    #[test]
    fn test_default_network_files() {
        let policy = TimeoutPolicy::default();
        assert!(policy.network_files.contains("discovery_test.dart"));
        assert!(policy.network_files.contains("zonegroupstate_test.dart"));
        assert_eq!(policy.network_files.len(), 2);
    }

    // ========================================
    // Classification tests
    // ========================================

    #[test]
    fn test_classify_network_file() {
        let policy = TimeoutPolicy::new();
        assert_eq!(policy.classify("discovery_test.dart"), FileClass::Network);
        assert_eq!(policy.duration_for(FileClass::Network), NETWORK_TIMEOUT_SECS);
    }

    #[test]
    fn test_classify_other_file() {
        let policy = TimeoutPolicy::new();
        assert_eq!(policy.classify("alarms_test.dart"), FileClass::Default);
        assert_eq!(policy.duration_for(FileClass::Default), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_classify_matches_whole_name_only() {
        let policy = TimeoutPolicy::new();
        assert_eq!(policy.classify("discovery_test.dart.bak"), FileClass::Default);
        assert_eq!(policy.classify("my_discovery_test.dart"), FileClass::Default);
    }

    // ========================================
    // Builder tests
    // ========================================

    #[test]
    fn test_builder_chain() {
        let policy = TimeoutPolicy::new()
            .with_default_secs(3)
            .with_network_secs(30)
            .with_network_files(["net_test.dart"]);

        assert_eq!(policy.duration_for(FileClass::Default), 3);
        assert_eq!(policy.duration_for(FileClass::Network), 30);
        assert_eq!(policy.classify("net_test.dart"), FileClass::Network);
        assert_eq!(policy.classify("discovery_test.dart"), FileClass::Default);
    }

    #[test]
    fn test_file_class_as_str() {
        assert_eq!(FileClass::Default.as_str(), "default");
        assert_eq!(FileClass::Network.as_str(), "network");
    }
}
