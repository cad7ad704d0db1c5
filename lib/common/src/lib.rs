//! Items shared between the members of the `facets` workspace.

mod macros;
