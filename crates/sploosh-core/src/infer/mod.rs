pub use self::{observation::*, posterior::*, recommend::*};

pub(crate) mod observation;
pub(crate) mod posterior;
pub(crate) mod recommend;
