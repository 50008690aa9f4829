//! Domain layer constants
//!
//! Constants shared between the domain vocabulary and the resolution
//! engine. Engine-internal tunables stay in the resolver crate.

// ============================================================================
// BINDING CONSTANTS
// ============================================================================

/// Priority assigned to a binding when the declaration does not specify one.
///
/// Explicit bindings registered without a priority land here, so any
/// declaration carrying a real priority (`>= 0`) shadows the default.
pub const DEFAULT_PRIORITY: i32 = -1;

/// Name of the implicit application-wide scope.
pub const APPLICATION_SCOPE: &str = "application";
