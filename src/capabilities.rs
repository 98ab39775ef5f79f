//! NNTP capabilities parsing and storage (RFC 3977 Section 5.2)
//!
//! The CAPABILITIES command returns a list of capabilities supported by the
//! server. Each capability may have optional arguments. Unknown capabilities
//! are preserved verbatim.

use std::collections::HashMap;

/// Represents the capabilities advertised by an NNTP server
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Map of capability name to its arguments
    /// Example: "VERSION" -> ["2"]
    capabilities: HashMap<String, Vec<String>>,
}

impl Capabilities {
    /// Create an empty Capabilities instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse capabilities from the 101 response payload
    ///
    /// # Format
    /// Each line is: `CAPABILITY [arg1 arg2 ...]`
    ///
    /// # Example
    /// ```text
    /// VERSION 2
    /// IMPLEMENTATION INN 2.6.3
    /// READER
    /// OVER
    /// STARTTLS
    /// ```
    pub fn parse(lines: &[String]) -> Self {
        let mut capabilities = HashMap::new();

        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let capability = parts[0].to_uppercase();
            let args: Vec<String> = parts[1..].iter().map(|s| s.to_string()).collect();
            capabilities.insert(capability, args);
        }

        Self { capabilities }
    }

    /// Check if a capability is advertised
    #[must_use]
    pub fn has(&self, capability: &str) -> bool {
        self.capabilities.contains_key(&capability.to_uppercase())
    }

    /// Get arguments for a capability
    ///
    /// Returns None if the capability is not advertised
    #[must_use]
    pub fn get_args(&self, capability: &str) -> Option<&Vec<String>> {
        self.capabilities.get(&capability.to_uppercase())
    }

    /// Get all capability names
    pub fn list(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }

    /// Check if the server advertises a capability with a specific argument
    pub fn has_arg(&self, capability: &str, arg: &str) -> bool {
        self.get_args(capability)
            .map(|args| args.iter().any(|a| a.eq_ignore_ascii_case(arg)))
            .unwrap_or(false)
    }

    /// Protocol version: the first integer argument of VERSION, defaulting
    /// to 1 for pre-RFC 3977 servers that do not advertise one.
    pub fn version(&self) -> u32 {
        self.get_args("VERSION")
            .and_then(|args| args.first())
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }

    /// Server software identification from IMPLEMENTATION, when advertised
    pub fn implementation(&self) -> Option<String> {
        self.get_args("IMPLEMENTATION")
            .filter(|args| !args.is_empty())
            .map(|args| args.join(" "))
    }
}
