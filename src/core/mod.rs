pub mod canon;
pub mod index;
pub mod random;
pub mod reference;
