//! Attribute-mutation observation types.
//!
//! The integration owns the real DOM observer and feeds batches of
//! [`AttributeMutation`]s into the bridge. Modeling observation as plain
//! data keeps the synchronization logic testable without a document: tests
//! feed synthetic batches instead of mutating a page.

// ============================================================================
// AttributeMutation
// ============================================================================

/// One observed attribute change on some element of the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMutation {
    /// Name of the attribute that changed.
    pub attribute: String,

    /// The attribute's value before the change.
    ///
    /// `None` when the attribute was just added. The first appearance of a
    /// state attribute carries no prior value; state logic treats that as
    /// "previously muted" rather than "unchanged".
    pub old_value: Option<String>,
}

impl AttributeMutation {
    /// Creates a mutation record.
    #[inline]
    #[must_use]
    pub fn new(attribute: impl Into<String>, old_value: Option<String>) -> Self {
        Self {
            attribute: attribute.into(),
            old_value,
        }
    }
}

/// A batch of mutations delivered by one observer callback.
///
/// Mutations within a batch are processed in delivery order, synchronously,
/// before any other event is handled.
pub type MutationBatch = Vec<AttributeMutation>;

// ============================================================================
// MutationFilter
// ============================================================================

/// The observation scope one capability's state depends on.
///
/// Observation is always filtered by attribute name, never an indiscriminate
/// whole-tree watch. The optional `scope` selector lets an integration
/// narrow its real observer to a subtree when the target UI allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFilter {
    /// Attribute names whose changes can affect this capability's state.
    pub attributes: Vec<&'static str>,

    /// Optional selector for the subtree root to observe.
    ///
    /// `None` observes the whole document, which is the common case: call
    /// controls may appear after load or re-appear during meeting
    /// transitions, so a narrower stable root rarely exists.
    pub scope: Option<&'static str>,
}

impl MutationFilter {
    /// Creates a whole-document filter on the given attribute names.
    #[inline]
    #[must_use]
    pub fn attributes(attributes: Vec<&'static str>) -> Self {
        Self {
            attributes,
            scope: None,
        }
    }

    /// Narrows this filter to a subtree root selector.
    #[inline]
    #[must_use]
    pub fn scoped(mut self, scope: &'static str) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Returns `true` if the mutation's attribute is within this filter.
    #[inline]
    #[must_use]
    pub fn matches(&self, mutation: &AttributeMutation) -> bool {
        self.attributes.iter().any(|a| *a == mutation.attribute)
    }
}

// ============================================================================
// Tests
// ============================================================================
