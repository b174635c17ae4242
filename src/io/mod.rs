//! IO modules - side effects (network, filesystem, external programs)

pub mod download;
pub mod export;
pub mod share;
