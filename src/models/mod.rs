pub mod crop;
pub mod decision;
pub mod features;
pub mod reading;

pub use crop::*;
pub use decision::*;
pub use features::*;
pub use reading::*;
