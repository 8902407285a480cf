pub mod canonical;
pub mod component;
pub mod debug;
pub mod envelope;
pub mod id;
pub mod processed;
pub mod report;
pub mod validation;
pub mod view;
mod util;

pub use canonical::*;
pub use component::*;
pub use debug::*;
pub use envelope::*;
pub use id::*;
pub use processed::*;
pub use report::*;
pub use validation::*;
pub use view::*;
pub use util::*;
