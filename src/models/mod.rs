mod vector3;
mod quaternion;
mod direction;
mod body;

pub use vector3::*;
pub use quaternion::*;
pub use direction::*;
pub use body::*;
