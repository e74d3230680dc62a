pub use self::{catalog::*, grid::*, layout::*, squid::*};

pub(crate) mod catalog;
pub(crate) mod grid;
pub(crate) mod layout;
pub(crate) mod squid;
