//! Configuration of the flattening pass.

/// Node enumeration used for discovery.
///
/// The order decides the order in which relocated types are appended to
/// their module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Pre-order walk from the root modules.
    #[default]
    Tree,
    /// Node arena order, i.e. creation order.
    Allocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    pub scan_order: ScanOrder,
    /// Check tree invariants before touching the program.
    pub verify_input: bool,
    /// Check tree invariants and completeness afterwards.
    pub verify_output: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            scan_order: ScanOrder::Tree,
            verify_input: true,
            verify_output: true,
        }
    }
}

impl FlattenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }

    pub fn with_verify_input(mut self, enabled: bool) -> Self {
        self.verify_input = enabled;
        self
    }

    pub fn with_verify_output(mut self, enabled: bool) -> Self {
        self.verify_output = enabled;
        self
    }

    /// Skip both verification steps.
    pub fn unchecked(self) -> Self {
        self.with_verify_input(false).with_verify_output(false)
    }
}
