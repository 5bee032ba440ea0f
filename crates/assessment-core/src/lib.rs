pub mod error;
pub mod features;
pub mod traits;
pub mod types;

pub use error::*;
pub use features::*;
pub use traits::*;
pub use types::*;
