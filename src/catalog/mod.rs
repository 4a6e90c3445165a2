pub mod image;
pub mod kind;
pub mod latest;

pub use self::image::*;
pub use self::kind::*;
pub use self::latest::*;
