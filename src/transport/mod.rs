pub mod link;
pub mod scan;

pub use link::SerialLink;
