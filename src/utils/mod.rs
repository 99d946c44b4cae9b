//! Filesystem locations and logger setup.

pub mod logging;
pub mod paths;
