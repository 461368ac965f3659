pub mod angle;
pub mod moon;
pub mod time;
pub mod visibility;
pub mod workflows;
