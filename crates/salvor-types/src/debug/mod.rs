mod record;
mod stage;

pub use record::*;
pub use stage::*;
